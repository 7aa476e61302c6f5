//! Service catalog: a fixed hierarchy of categories, subcategories, items and
//! pre-bundled packs. Loaded once at startup and handed around as read-only
//! reference data; quote lines snapshot the prices they copy from it.

mod data;

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogCategory {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSubcategory {
    pub id: &'static str,
    pub category_id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub category_id: &'static str,
    pub subcategory_id: &'static str,
    /// Net unit price. `None` means "sur devis": the item cannot be added to
    /// a quote until the user supplies a price.
    pub unit_price: Option<Decimal>,
    /// Pricing unit label, e.g. "/page" or "/mois".
    pub price_unit: &'static str,
    pub popular: bool,
    pub delay: &'static str,
    pub deliverables: &'static [&'static str],
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogPack {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    /// Human-readable included services. Display text only: a pack is priced
    /// as a whole and becomes a single quote line.
    pub includes: &'static [&'static str],
    pub price: Decimal,
    pub price_label: &'static str,
    pub popular: bool,
    pub agency_only: bool,
    pub savings: &'static str,
    pub ideal_for: &'static str,
}

/// Read-only catalog repository. Unknown ids yield empty lists, never errors.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CatalogCategory>,
    subcategories: Vec<CatalogSubcategory>,
    items: Vec<CatalogItem>,
    packs: Vec<CatalogPack>,
}

impl Catalog {
    /// Build the catalog from the built-in reference data.
    pub fn load() -> Self {
        Self {
            categories: data::categories(),
            subcategories: data::subcategories(),
            items: data::items(),
            packs: data::packs(),
        }
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn subcategories(&self, category_id: Option<&str>) -> Vec<&CatalogSubcategory> {
        self.subcategories
            .iter()
            .filter(|s| category_id.is_none_or(|c| s.category_id == c))
            .collect()
    }

    pub fn items(&self, subcategory_id: Option<&str>) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|i| subcategory_id.is_none_or(|s| i.subcategory_id == s))
            .collect()
    }

    pub fn packs(&self, include_agency_only: bool) -> Vec<&CatalogPack> {
        self.packs
            .iter()
            .filter(|p| include_agency_only || !p.agency_only)
            .collect()
    }

    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn pack(&self, id: &str) -> Option<&CatalogPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_is_consistent() {
        let catalog = Catalog::load();
        for sub in catalog.subcategories(None) {
            assert!(
                catalog.category(sub.category_id).is_some(),
                "subcategory {} references unknown category {}",
                sub.id,
                sub.category_id
            );
        }
        for item in catalog.items(None) {
            assert!(
                catalog
                    .subcategories(Some(item.category_id))
                    .iter()
                    .any(|s| s.id == item.subcategory_id),
                "item {} references unknown subcategory {}",
                item.id,
                item.subcategory_id
            );
        }
    }

    #[test]
    fn test_unknown_ids_yield_empty_lists() {
        let catalog = Catalog::load();
        assert!(catalog.subcategories(Some("nope")).is_empty());
        assert!(catalog.items(Some("nope")).is_empty());
        assert!(catalog.item("nope").is_none());
        assert!(catalog.pack("nope").is_none());
    }

    #[test]
    fn test_agency_packs_are_filtered_by_default() {
        let catalog = Catalog::load();
        let public = catalog.packs(false);
        assert!(public.iter().all(|p| !p.agency_only));
        assert!(catalog.packs(true).len() > public.len());
    }

    #[test]
    fn test_catalog_has_quote_on_request_items() {
        let catalog = Catalog::load();
        assert!(catalog.items(None).iter().any(|i| i.unit_price.is_none()));
    }
}
