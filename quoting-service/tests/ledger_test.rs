//! Draft ledger tests: adding from the catalog, pack atomicity and the
//! silent no-op semantics of line edits.

use quoting_service::catalog::Catalog;
use quoting_service::draft::{ClientInfo, LineUpdate, QuoteDraft, PACK_SECTION};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

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
fn catalog_item_becomes_a_priced_line() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");

    let item = catalog.item("site-vitrine-essentiel").expect("item in catalog");
    let id = draft
        .add_from_catalog_item(&catalog, item)
        .expect("priced item is addable");

    assert_eq!(draft.lines.len(), 1);
    let line = &draft.lines[0];
    assert_eq!(line.id, id);
    assert_eq!(
        line.catalog_item_id.as_deref(),
        Some("site-vitrine-essentiel")
    );
    assert_eq!(line.quantity, Decimal::ONE);
    assert_eq!(Some(line.unit_price), item.unit_price);
}

#[test]
fn quote_on_request_item_is_rejected() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");

    let item = catalog.item("migration-ecommerce").expect("item in catalog");
    assert!(item.unit_price.is_none());

    assert_eq!(draft.add_from_catalog_item(&catalog, item), None);
    assert!(draft.lines.is_empty());
    assert_eq!(draft.compute_totals().net_total, Decimal::ZERO);
}

#[test]
fn pack_lands_as_a_single_line_at_flat_price() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");

    let pack = catalog.pack("pack-vitrine-seo").expect("pack in catalog");
    draft.add_from_pack(pack);

    assert_eq!(draft.lines.len(), 1);
    let line = &draft.lines[0];
    assert_eq!(line.label, "Site vitrine + SEO");
    assert_eq!(line.quantity, Decimal::ONE);
    assert_eq!(line.unit_price, dec("1200"));
    assert_eq!(line.section, PACK_SECTION);
    // The bundle is display text, not constituent lines.
    assert!(line.description.contains("+"));
    assert_eq!(draft.compute_totals().net_total, dec("1200"));
}

#[test]
fn update_with_unknown_id_is_a_no_op() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");
    let item = catalog.item("site-vitrine-essentiel").unwrap();
    draft.add_from_catalog_item(&catalog, item).unwrap();
    let before = draft.compute_totals().net_total;

    draft.update_line(
        Uuid::new_v4(),
        LineUpdate {
            unit_price: Some(dec("999999")),
            ..Default::default()
        },
    );

    assert_eq!(draft.compute_totals().net_total, before);
}

#[test]
fn remove_with_unknown_id_is_a_no_op() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");
    let item = catalog.item("site-vitrine-essentiel").unwrap();
    draft.add_from_catalog_item(&catalog, item).unwrap();

    draft.remove_line(Uuid::new_v4());
    assert_eq!(draft.lines.len(), 1);
}

#[test]
fn totals_follow_every_mutation() {
    let mut draft = draft_for("ACME");
    let a = draft.add_custom_line();
    draft.update_line(
        a,
        LineUpdate {
            label: Some("Page".to_string()),
            quantity: Some(dec("4")),
            unit_price: Some(dec("150")),
            ..Default::default()
        },
    );
    assert_eq!(draft.compute_totals().net_total, dec("600"));

    let b = draft.add_custom_line();
    draft.update_line(
        b,
        LineUpdate {
            label: Some("Logo".to_string()),
            unit_price: Some(dec("300")),
            ..Default::default()
        },
    );
    assert_eq!(draft.compute_totals().net_total, dec("900"));

    draft.remove_line(a);
    let totals = draft.compute_totals();
    assert_eq!(totals.net_total, dec("300"));
    assert_eq!(totals.lines.len(), 1);
    assert_eq!(totals.lines[0].0, b);
}

#[test]
fn ledger_preserves_insertion_order() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");

    let pack = catalog.pack("pack-vitrine-seo").unwrap();
    draft.add_from_pack(pack);
    let custom = draft.add_custom_line();
    draft.update_line(
        custom,
        LineUpdate {
            label: Some("Formation".to_string()),
            unit_price: Some(dec("200")),
            ..Default::default()
        },
    );

    let totals = draft.compute_totals();
    assert_eq!(totals.lines[0].1, dec("1200"));
    assert_eq!(totals.lines[1].0, custom);
}

#[test]
fn validation_rejects_empty_drafts_and_bad_lines() {
    let draft = draft_for("  ");
    let issues = draft.validate().unwrap_err();
    assert!(issues.iter().any(|i| i.field == "client_name"));
    assert!(issues.iter().any(|i| i.field == "lines"));

    let mut draft = draft_for("ACME");
    let id = draft.add_custom_line();
    draft.update_line(
        id,
        LineUpdate {
            label: Some("Bad".to_string()),
            quantity: Some(Decimal::ZERO),
            unit_price: Some(dec("-5")),
            discount_percent: Some(dec("150")),
            ..Default::default()
        },
    );
    let issues = draft.validate().unwrap_err();
    assert!(issues.iter().any(|i| i.field == "quantity"));
    assert!(issues.iter().any(|i| i.field == "unit_price"));
    assert!(issues.iter().any(|i| i.field == "discount_percent"));
}

#[test]
fn valid_draft_passes_the_gate() {
    let catalog = Catalog::load();
    let mut draft = draft_for("ACME");
    let item = catalog.item("site-vitrine-essentiel").unwrap();
    draft.add_from_catalog_item(&catalog, item).unwrap();

    assert!(draft.validate().is_ok());
}
