//! Quote document rendering tests. The document is built from the stored
//! quote alone, so these run against hand-built rows.

use chrono::{TimeZone, Utc};
use quoting_service::config::IssuerConfig;
use quoting_service::models::{Quote, QuoteLine};
use quoting_service::pdf::{build_document, write_pdf};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn issuer() -> IssuerConfig {
    IssuerConfig {
        brand: "KLUSTER".to_string(),
        name: "MATHIEU KLOPP".to_string(),
        address: "21 Rue Pierre Noailles, 33400 Talence".to_string(),
        siret: "84785443700013".to_string(),
        vat_number: "FR29847854437".to_string(),
    }
}

fn stored_quote() -> Quote {
    let created = Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap();
    Quote {
        quote_id: Uuid::new_v4(),
        reference: "DEV-2026-042".to_string(),
        status: "sent".to_string(),
        company_id: None,
        contact_id: None,
        client_name: "Boulangerie Martin".to_string(),
        client_address: Some("4 Place du Marché, 33000 Bordeaux".to_string()),
        client_siret: Some("12345678900011".to_string()),
        client_vat_number: None,
        discount_percent: dec("5"),
        vat_rate: dec("20"),
        total_ht: dec("180"),
        discount_amount: dec("9"),
        total_after_discount: dec("171"),
        total_vat: dec("34.2"),
        total_ttc: dec("205.2"),
        notes: Some("Acompte de 30 % à la commande.".to_string()),
        conditions: None,
        created_utc: created,
        updated_utc: created,
        issued_utc: Some(created),
        valid_until: Some(Utc.with_ymd_and_hms(2026, 4, 4, 9, 30, 0).unwrap()),
        accepted_utc: None,
    }
}

fn stored_line(quote_id: Uuid) -> QuoteLine {
    QuoteLine {
        line_id: Uuid::new_v4(),
        quote_id,
        sort_order: 0,
        catalog_item_id: Some("page-supplementaire".to_string()),
        label: "Page supplémentaire".to_string(),
        description: Some("Maquette et intégration".to_string()),
        quantity: dec("2"),
        unit_price: dec("100"),
        discount_percent: dec("10"),
        total_ht: dec("180"),
        unit_label: "page".to_string(),
        section: Some("Sites web".to_string()),
        created_utc: Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap(),
    }
}

#[test]
fn document_uses_stored_totals_verbatim() {
    let quote = stored_quote();
    let lines = vec![stored_line(quote.quote_id)];

    let document = build_document(&issuer(), &quote, &lines);

    assert_eq!(document.title, "DEVIS");
    assert_eq!(document.reference, "DEV-2026-042");
    assert_eq!(document.date_line, "Date : 05/03/2026   -   Valable jusqu'au : 04/04/2026");

    let labels: Vec<&str> = document.totals.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Total HT", "Remise (5%)", "Après remise", "TVA (20%)", "Total TTC"]
    );
    let amounts: Vec<&str> = document.totals.iter().map(|t| t.amount.as_str()).collect();
    assert_eq!(
        amounts,
        vec!["180,00 EUR", "-9,00 EUR", "171,00 EUR", "34,20 EUR", "205,20 EUR"]
    );
    assert!(document.totals.last().unwrap().emphasis);
}

#[test]
fn stored_totals_win_over_any_recomputation() {
    // Deliberately inconsistent figures: the document must echo what was
    // persisted, not re-derive it from the lines.
    let mut quote = stored_quote();
    quote.total_ttc = dec("9999");
    let lines = vec![stored_line(quote.quote_id)];

    let document = build_document(&issuer(), &quote, &lines);
    assert_eq!(document.totals.last().unwrap().amount, "9 999,00 EUR");
}

#[test]
fn discount_rows_are_omitted_without_a_discount() {
    let mut quote = stored_quote();
    quote.discount_percent = Decimal::ZERO;
    quote.discount_amount = Decimal::ZERO;

    let document = build_document(&issuer(), &quote, &[]);
    let labels: Vec<&str> = document.totals.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Total HT", "TVA (20%)", "Total TTC"]);
}

#[test]
fn line_rows_carry_french_formatting() {
    let quote = stored_quote();
    let lines = vec![stored_line(quote.quote_id)];

    let document = build_document(&issuer(), &quote, &lines);
    let row = &document.rows[0];
    assert_eq!(row.quantity, "2 page");
    assert_eq!(row.unit_price, "100,00 EUR");
    assert_eq!(row.discount, "-10%");
    assert_eq!(row.total, "180,00 EUR");
}

#[test]
fn same_quote_renders_the_same_document() {
    let quote = stored_quote();
    let lines = vec![stored_line(quote.quote_id)];

    let first = build_document(&issuer(), &quote, &lines);
    let second = build_document(&issuer(), &quote, &lines);
    assert_eq!(first, second);
}

#[test]
fn pdf_bytes_are_produced() {
    let quote = stored_quote();
    let lines = vec![stored_line(quote.quote_id)];

    let document = build_document(&issuer(), &quote, &lines);
    let bytes = write_pdf(&document).expect("render succeeds");

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn footer_names_the_issuer_and_reference() {
    let quote = stored_quote();
    let document = build_document(&issuer(), &quote, &[]);

    assert_eq!(
        document.footer_left,
        "MATHIEU KLOPP - SIRET : 84785443700013 - DEV-2026-042"
    );
    assert!(document.legal_footer.contains("30 jours"));
}
