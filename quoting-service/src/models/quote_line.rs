//! Persisted quote line. Immutable snapshot once the parent quote exists:
//! the price lives on the line, not on the catalog item it came from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuoteLine {
    pub line_id: Uuid,
    pub quote_id: Uuid,
    pub sort_order: i32,
    pub catalog_item_id: Option<String>,
    pub label: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub total_ht: Decimal,
    pub unit_label: String,
    pub section: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for inserting a line snapshot alongside its quote.
#[derive(Debug, Clone)]
pub struct CreateQuoteLine {
    pub line_id: Uuid,
    pub sort_order: i32,
    pub catalog_item_id: Option<String>,
    pub label: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub total_ht: Decimal,
    pub unit_label: String,
    pub section: Option<String>,
}
