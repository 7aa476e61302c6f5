use crate::dtos::{CatalogSearchParams, ItemsParams, PacksParams, SubcategoriesParams};
use crate::search::fuzzy_search;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.categories().to_vec())
}

pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(params): Query<SubcategoriesParams>,
) -> impl IntoResponse {
    let subcategories: Vec<_> = state
        .catalog
        .subcategories(params.category.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Json(subcategories)
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemsParams>,
) -> impl IntoResponse {
    let items: Vec<_> = state
        .catalog
        .items(params.subcategory.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Json(items)
}

pub async fn list_packs(
    State(state): State<AppState>,
    Query(params): Query<PacksParams>,
) -> impl IntoResponse {
    let packs: Vec<_> = state
        .catalog
        .packs(params.include_agency)
        .into_iter()
        .cloned()
        .collect();
    Json(packs)
}

/// Fuzzy lookup over the whole item list, for the wizard's quick-add box.
pub async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<CatalogSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 50);
    let items = state.catalog.items(None);
    let matches: Vec<_> = fuzzy_search(
        &params.q,
        &items,
        |item| vec![item.name.to_string(), item.subtitle.to_string()],
        limit,
    )
    .into_iter()
    .map(|item| (*item).clone())
    .collect();

    Ok(Json(matches))
}
