//! Pure construction of the quote document content.
//!
//! Everything load-bearing about the PDF (client block, line table, the
//! five totals) is assembled here as plain strings from the persisted
//! quote. The catalog is never consulted: a later price change must not
//! alter a previously generated document.

use crate::config::IssuerConfig;
use crate::models::{Quote, QuoteLine};
use crate::pdf::format::{fmt_date, fmt_eur, fmt_percent, fmt_quantity};
use rust_decimal::Decimal;

pub const TABLE_HEADER: [&str; 5] = ["Prestation", "Qté", "Prix unit. HT", "Remise", "Total HT"];

const LEGAL_FOOTER: &str =
    "Ce devis est valable 30 jours à compter de sa date d'émission, sauf indication contraire.";

/// One row of the line table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub description: Option<String>,
    pub quantity: String,
    pub unit_price: String,
    pub discount: String,
    pub total: String,
}

/// One row of the totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalRow {
    pub label: String,
    pub amount: String,
    pub emphasis: bool,
}

/// The full textual content of a rendered quote, before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDocument {
    pub reference: String,
    pub brand: String,
    pub title: String,
    pub date_line: String,
    pub issuer: Vec<String>,
    pub client: Vec<String>,
    pub rows: Vec<TableRow>,
    pub totals: Vec<TotalRow>,
    pub notes: Option<String>,
    pub footer_left: String,
    pub legal_footer: String,
}

/// Build the document content for a persisted quote. Deterministic: the
/// same quote and lines always produce identical output.
pub fn build_document(issuer: &IssuerConfig, quote: &Quote, lines: &[QuoteLine]) -> QuoteDocument {
    let mut date_line = format!("Date : {}", fmt_date(quote.created_utc));
    if let Some(valid_until) = quote.valid_until {
        date_line.push_str(&format!("   -   Valable jusqu'au : {}", fmt_date(valid_until)));
    }

    let issuer_block = vec![
        issuer.name.clone(),
        issuer.address.clone(),
        format!("SIRET : {}", issuer.siret),
        format!("TVA : {}", issuer.vat_number),
    ];

    let mut client_block = vec![quote.client_name.clone()];
    if let Some(address) = quote.client_address.as_deref() {
        client_block.push(address.to_string());
    }
    if let Some(siret) = quote.client_siret.as_deref() {
        client_block.push(format!("SIRET : {}", siret));
    }
    if let Some(vat) = quote.client_vat_number.as_deref() {
        client_block.push(format!("TVA : {}", vat));
    }

    let rows = lines
        .iter()
        .map(|line| TableRow {
            label: line.label.clone(),
            description: line.description.clone().filter(|d| !d.is_empty()),
            quantity: format!("{} {}", fmt_quantity(line.quantity), line.unit_label)
                .trim_end()
                .to_string(),
            unit_price: fmt_eur(line.unit_price),
            discount: if line.discount_percent > Decimal::ZERO {
                format!("-{}", fmt_percent(line.discount_percent))
            } else {
                "-".to_string()
            },
            total: fmt_eur(line.total_ht),
        })
        .collect();

    let mut totals = vec![TotalRow {
        label: "Total HT".to_string(),
        amount: fmt_eur(quote.total_ht),
        emphasis: false,
    }];
    if quote.discount_percent > Decimal::ZERO {
        totals.push(TotalRow {
            label: format!("Remise ({})", fmt_percent(quote.discount_percent)),
            amount: format!("-{}", fmt_eur(quote.discount_amount)),
            emphasis: false,
        });
        totals.push(TotalRow {
            label: "Après remise".to_string(),
            amount: fmt_eur(quote.total_after_discount),
            emphasis: false,
        });
    }
    totals.push(TotalRow {
        label: format!("TVA ({})", fmt_percent(quote.vat_rate)),
        amount: fmt_eur(quote.total_vat),
        emphasis: false,
    });
    totals.push(TotalRow {
        label: "Total TTC".to_string(),
        amount: fmt_eur(quote.total_ttc),
        emphasis: true,
    });

    QuoteDocument {
        reference: quote.reference.clone(),
        brand: issuer.brand.clone(),
        title: "DEVIS".to_string(),
        date_line,
        issuer: issuer_block,
        client: client_block,
        rows,
        totals,
        notes: quote.notes.clone().filter(|n| !n.is_empty()),
        footer_left: format!("{} - SIRET : {} - {}", issuer.name, issuer.siret, quote.reference),
        legal_footer: LEGAL_FOOTER.to_string(),
    }
}
