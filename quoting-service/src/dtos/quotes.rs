use crate::models::{Quote, QuoteLine, QuoteStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a quote. The caller supplies the quote id so a
/// retried submission is idempotent.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    pub quote_id: Uuid,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    #[validate(length(min = 1, message = "client name must not be empty"))]
    pub client_name: String,
    pub client_address: Option<String>,
    pub client_siret: Option<String>,
    pub client_vat_number: Option<String>,
    #[serde(default)]
    pub discount_percent: Decimal,
    /// Checked against the accepted VAT menu (0, 5.5, 10, 20) before any
    /// pricing happens.
    pub vat_rate: Decimal,
    pub notes: Option<String>,
    pub conditions: Option<String>,
    #[validate(length(min = 1, message = "a quote needs at least one line"))]
    pub lines: Vec<QuoteLineRequest>,
}

/// One line of a quote being created. A line comes from one of three
/// sources: a priced catalog item, a pack (always one line at its flat
/// price) or free manual entry.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteLineRequest {
    CatalogItem {
        item_id: String,
        quantity: Option<Decimal>,
        discount_percent: Option<Decimal>,
    },
    Pack {
        pack_id: String,
        quantity: Option<Decimal>,
    },
    Custom {
        label: String,
        description: Option<String>,
        quantity: Option<Decimal>,
        unit_price: Decimal,
        discount_percent: Option<Decimal>,
        unit_label: Option<String>,
        section: Option<String>,
    },
}

/// Request body for moving a quote along its lifecycle.
#[derive(Debug, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub status: QuoteStatus,
}

/// Query parameters for listing quotes.
#[derive(Debug, Deserialize)]
pub struct ListQuotesParams {
    pub status: Option<QuoteStatus>,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub page_size: Option<i32>,
    pub page_token: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub reference: String,
    pub status: String,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub client_name: String,
    pub client_address: Option<String>,
    pub client_siret: Option<String>,
    pub client_vat_number: Option<String>,
    pub discount_percent: Decimal,
    pub vat_rate: Decimal,
    pub total_ht: Decimal,
    pub discount_amount: Decimal,
    pub total_after_discount: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
    pub notes: Option<String>,
    pub conditions: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
    pub issued_utc: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub accepted_utc: Option<DateTime<Utc>>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            quote_id: quote.quote_id,
            reference: quote.reference,
            status: quote.status,
            company_id: quote.company_id,
            contact_id: quote.contact_id,
            client_name: quote.client_name,
            client_address: quote.client_address,
            client_siret: quote.client_siret,
            client_vat_number: quote.client_vat_number,
            discount_percent: quote.discount_percent,
            vat_rate: quote.vat_rate,
            total_ht: quote.total_ht,
            discount_amount: quote.discount_amount,
            total_after_discount: quote.total_after_discount,
            total_vat: quote.total_vat,
            total_ttc: quote.total_ttc,
            notes: quote.notes,
            conditions: quote.conditions,
            created_utc: quote.created_utc,
            updated_utc: quote.updated_utc,
            issued_utc: quote.issued_utc,
            valid_until: quote.valid_until,
            accepted_utc: quote.accepted_utc,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteLineResponse {
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

impl From<QuoteLine> for QuoteLineResponse {
    fn from(line: QuoteLine) -> Self {
        Self {
            line_id: line.line_id,
            sort_order: line.sort_order,
            catalog_item_id: line.catalog_item_id,
            label: line.label,
            description: line.description,
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount_percent: line.discount_percent,
            total_ht: line.total_ht,
            unit_label: line.unit_label,
            section: line.section,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteWithLinesResponse {
    #[serde(flatten)]
    pub quote: QuoteResponse,
    pub lines: Vec<QuoteLineResponse>,
}

#[derive(Debug, Serialize)]
pub struct ListQuotesResponse {
    pub quotes: Vec<QuoteResponse>,
    pub next_page_token: Option<Uuid>,
}
