//! Totals derivation tests: line totals, global discount and VAT stacking.

use quoting_service::draft::{ClientInfo, LineUpdate, QuoteDraft};
use quoting_service::pricing::{compute_quote_totals, VatRate};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn draft_for(client_name: &str) -> QuoteDraft {
    QuoteDraft::new(ClientInfo {
        client_name: client_name.to_string(),
        ..Default::default()
    })
}

#[test]
fn discounted_line_with_global_discount_and_vat() {
    // 2 × 100 with 10% line discount, then 5% global, then 20% VAT.
    let mut draft = draft_for("ACME");
    let id = draft.add_custom_line();
    draft.update_line(
        id,
        LineUpdate {
            label: Some("Maquette".to_string()),
            quantity: Some(dec("2")),
            unit_price: Some(dec("100")),
            discount_percent: Some(dec("10")),
            ..Default::default()
        },
    );
    draft.global_discount_percent = dec("5");
    draft.vat_rate = VatRate::Standard;

    let totals = draft.quote_totals();
    assert_eq!(totals.net_total, dec("180"));
    assert_eq!(totals.discount_amount, dec("9.0"));
    assert_eq!(totals.net_after_discount, dec("171.0"));
    assert_eq!(totals.vat_amount, dec("34.20"));
    assert_eq!(totals.gross_total, dec("205.20"));
}

#[test]
fn totals_carry_full_precision_between_stages() {
    // A repeating-decimal intermediate must not be rounded before the next
    // stage is applied.
    let totals = compute_quote_totals(dec("100"), dec("33.33"), VatRate::Intermediate);
    assert_eq!(totals.discount_amount, dec("33.33"));
    assert_eq!(totals.net_after_discount, dec("66.67"));
    assert_eq!(totals.vat_amount, dec("6.667"));
    assert_eq!(totals.gross_total, dec("73.337"));
}

#[test]
fn zero_vat_yields_equal_net_and_gross() {
    let totals = compute_quote_totals(dec("500"), Decimal::ZERO, VatRate::Zero);
    assert_eq!(totals.vat_amount, Decimal::ZERO);
    assert_eq!(totals.gross_total, totals.net_after_discount);
}

#[test]
fn vat_menu_accepts_only_the_four_rates() {
    assert!(VatRate::try_from(dec("0")).is_ok());
    assert!(VatRate::try_from(dec("5.5")).is_ok());
    assert!(VatRate::try_from(dec("10")).is_ok());
    assert!(VatRate::try_from(dec("20")).is_ok());
    assert!(VatRate::try_from(dec("19.6")).is_err());
    assert!(VatRate::try_from(dec("21")).is_err());
    assert!(VatRate::try_from(dec("-20")).is_err());
}

#[test]
fn vat_menu_ignores_trailing_zeroes() {
    assert_eq!(VatRate::try_from(dec("20.00")).unwrap(), VatRate::Standard);
    assert_eq!(VatRate::try_from(dec("5.50")).unwrap(), VatRate::Reduced);
}

#[test]
fn full_line_discount_zeroes_the_quote() {
    let mut draft = draft_for("ACME");
    let id = draft.add_custom_line();
    draft.update_line(
        id,
        LineUpdate {
            label: Some("Offert".to_string()),
            quantity: Some(dec("3")),
            unit_price: Some(dec("40")),
            discount_percent: Some(dec("100")),
            ..Default::default()
        },
    );

    let totals = draft.quote_totals();
    assert_eq!(totals.net_total, Decimal::ZERO);
    assert_eq!(totals.gross_total, Decimal::ZERO);
}
