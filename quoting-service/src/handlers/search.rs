use crate::dtos::{CompanyMatch, ContactMatch, SearchParams};
use crate::search::fuzzy_search;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

const DEFAULT_LIMIT: usize = 10;

/// Autocomplete over company names. Candidates come from the database on
/// every call; ranking happens in memory.
pub async fn search_companies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 50);
    let companies = state.db.list_companies().await?;

    let matches: Vec<CompanyMatch> =
        fuzzy_search(&params.q, &companies, |c| vec![c.name.clone()], limit)
            .into_iter()
            .map(CompanyMatch::from)
            .collect();

    Ok(Json(matches))
}

/// Autocomplete over contact names and email addresses.
pub async fn search_contacts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 50);
    let contacts = state.db.list_contacts().await?;

    let matches: Vec<ContactMatch> = fuzzy_search(
        &params.q,
        &contacts,
        |c| {
            let mut texts = vec![c.full_name()];
            if let Some(email) = &c.email {
                texts.push(email.clone());
            }
            texts
        },
        limit,
    )
    .into_iter()
    .map(ContactMatch::from)
    .collect();

    Ok(Json(matches))
}
