//! Quote draft: client info, the ordered line ledger and its running totals.
//!
//! The draft is wizard-scoped and single-writer; all operations here are
//! synchronous and pure with respect to ledger state. Totals are recomputed
//! from scratch after every mutation, never cached incrementally.

use crate::catalog::{Catalog, CatalogItem, CatalogPack};
use crate::pricing::{self, QuoteTotals, VatRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_UNIT_LABEL: &str = "unité";
pub const CUSTOM_SECTION: &str = "Personnalisé";
pub const PACK_SECTION: &str = "Packs";

/// A draft-time line. Mutable until the parent quote is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLine {
    pub id: Uuid,
    pub catalog_item_id: Option<String>,
    pub label: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub unit_label: String,
    pub section: String,
}

impl DraftLine {
    pub fn total(&self) -> Decimal {
        pricing::line_total(self.quantity, self.unit_price, self.discount_percent)
    }
}

/// Partial update for a single line. Every field independently optional;
/// absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineUpdate {
    pub label: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub unit_label: Option<String>,
    pub section: Option<String>,
}

/// Client identity captured on the draft. Free text, optionally linked to
/// existing company/contact records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub client_name: String,
    pub client_address: Option<String>,
    pub client_siret: Option<String>,
    pub client_vat_number: Option<String>,
}

/// Field-scoped validation failure, surfaced before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIssue {
    pub field: &'static str,
    pub message: String,
}

/// Running totals emitted after every ledger mutation.
#[derive(Debug, Clone)]
pub struct LedgerTotals {
    pub net_total: Decimal,
    pub lines: Vec<(Uuid, Decimal)>,
}

/// An in-progress quote.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub client: ClientInfo,
    pub lines: Vec<DraftLine>,
    pub global_discount_percent: Decimal,
    pub vat_rate: VatRate,
    pub notes: Option<String>,
    pub conditions: Option<String>,
}

impl QuoteDraft {
    pub fn new(client: ClientInfo) -> Self {
        Self {
            client,
            lines: Vec::new(),
            global_discount_percent: Decimal::ZERO,
            vat_rate: VatRate::Standard,
            notes: None,
            conditions: None,
        }
    }

    /// Append a line from a catalog item. Items without a price are "sur
    /// devis" and cannot be added directly: the call is a no-op and returns
    /// `None`.
    pub fn add_from_catalog_item(
        &mut self,
        catalog: &Catalog,
        item: &CatalogItem,
    ) -> Option<Uuid> {
        let unit_price = item.unit_price?;
        let section = catalog
            .category(item.category_id)
            .map(|c| c.label.to_string())
            .unwrap_or_default();
        let unit_label = match item.price_unit.trim_start_matches('/') {
            "" => DEFAULT_UNIT_LABEL.to_string(),
            unit => unit.to_string(),
        };

        let id = Uuid::new_v4();
        self.lines.push(DraftLine {
            id,
            catalog_item_id: Some(item.id.to_string()),
            label: item.name.to_string(),
            description: item.subtitle.to_string(),
            quantity: Decimal::ONE,
            unit_price,
            discount_percent: Decimal::ZERO,
            unit_label,
            section,
        });
        Some(id)
    }

    /// Append a pack as exactly one line at its flat price. The description
    /// enumerates the included services; the bundle is never exploded into
    /// constituent lines.
    pub fn add_from_pack(&mut self, pack: &CatalogPack) -> Uuid {
        let id = Uuid::new_v4();
        self.lines.push(DraftLine {
            id,
            catalog_item_id: None,
            label: pack.name.to_string(),
            description: format!("{} — {}", pack.subtitle, pack.includes.join(" + ")),
            quantity: Decimal::ONE,
            unit_price: pack.price,
            discount_percent: Decimal::ZERO,
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            section: PACK_SECTION.to_string(),
        });
        id
    }

    /// Append a blank line for full manual entry.
    pub fn add_custom_line(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.lines.push(DraftLine {
            id,
            catalog_item_id: None,
            label: String::new(),
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            section: CUSTOM_SECTION.to_string(),
        });
        id
    }

    /// Merge an update into the matching line. Unknown ids are ignored:
    /// stale ids from interactive editing are not errors.
    pub fn update_line(&mut self, id: Uuid, update: LineUpdate) {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return;
        };
        if let Some(label) = update.label {
            line.label = label;
        }
        if let Some(description) = update.description {
            line.description = description;
        }
        if let Some(quantity) = update.quantity {
            line.quantity = quantity;
        }
        if let Some(unit_price) = update.unit_price {
            line.unit_price = unit_price;
        }
        if let Some(discount_percent) = update.discount_percent {
            line.discount_percent = discount_percent;
        }
        if let Some(unit_label) = update.unit_label {
            line.unit_label = unit_label;
        }
        if let Some(section) = update.section {
            line.section = section;
        }
    }

    /// Remove a line. Unknown id is a no-op.
    pub fn remove_line(&mut self, id: Uuid) {
        self.lines.retain(|l| l.id != id);
    }

    /// Recompute every line total and the net sum. Insertion order is
    /// preserved.
    pub fn compute_totals(&self) -> LedgerTotals {
        let lines: Vec<(Uuid, Decimal)> =
            self.lines.iter().map(|l| (l.id, l.total())).collect();
        let net_total = lines.iter().map(|(_, t)| *t).sum();
        LedgerTotals { net_total, lines }
    }

    /// Full tax breakdown of the draft under the fixed evaluation order.
    pub fn quote_totals(&self) -> QuoteTotals {
        pricing::compute_quote_totals(
            self.compute_totals().net_total,
            self.global_discount_percent,
            self.vat_rate,
        )
    }

    /// Validation gate run before submission. Failures never reach the
    /// persistence layer.
    pub fn validate(&self) -> Result<(), Vec<DraftIssue>> {
        let mut issues = Vec::new();

        if self.client.client_name.trim().is_empty() {
            issues.push(DraftIssue {
                field: "client_name",
                message: "client name must not be empty".to_string(),
            });
        }
        if self.lines.is_empty() {
            issues.push(DraftIssue {
                field: "lines",
                message: "a quote needs at least one line".to_string(),
            });
        }
        for line in &self.lines {
            if line.quantity <= Decimal::ZERO {
                issues.push(DraftIssue {
                    field: "quantity",
                    message: format!("line '{}' has a non-positive quantity", line.label),
                });
            }
            if line.unit_price < Decimal::ZERO {
                issues.push(DraftIssue {
                    field: "unit_price",
                    message: format!("line '{}' has a negative unit price", line.label),
                });
            }
            if line.discount_percent < Decimal::ZERO
                || line.discount_percent > Decimal::from(100)
            {
                issues.push(DraftIssue {
                    field: "discount_percent",
                    message: format!("line '{}' discount must be between 0 and 100", line.label),
                });
            }
        }
        if self.global_discount_percent < Decimal::ZERO
            || self.global_discount_percent > Decimal::from(100)
        {
            issues.push(DraftIssue {
                field: "discount_percent",
                message: "global discount must be between 0 and 100".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
