use serde::Deserialize;

/// Query parameters for listing subcategories.
#[derive(Debug, Deserialize)]
pub struct SubcategoriesParams {
    pub category: Option<String>,
}

/// Query parameters for listing items.
#[derive(Debug, Deserialize)]
pub struct ItemsParams {
    pub subcategory: Option<String>,
}

/// Query parameters for listing packs.
#[derive(Debug, Deserialize)]
pub struct PacksParams {
    #[serde(default)]
    pub include_agency: bool,
}

/// Query parameters for the catalog quick-add search.
#[derive(Debug, Deserialize)]
pub struct CatalogSearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}
