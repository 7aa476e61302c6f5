use crate::draft::{ClientInfo, LineUpdate, QuoteDraft};
use crate::dtos::{
    CreateQuoteRequest, ListQuotesParams, ListQuotesResponse, QuoteLineRequest, QuoteLineResponse,
    QuoteResponse, QuoteWithLinesResponse, UpdateQuoteStatusRequest,
};
use crate::models::{CreateQuote, CreateQuoteLine, ListQuotesFilter, QuoteStatus};
use crate::pdf;
use crate::pricing::VatRate;
use crate::services::metrics::{PDF_RENDER_DURATION, QUOTES_TOTAL, QUOTE_AMOUNT_TOTAL};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use rust_decimal::prelude::ToPrimitive;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_PAGE_SIZE: i32 = 20;

/// Build the in-memory draft from the request, running every line through
/// the same ledger the interactive wizard uses.
fn build_draft(state: &AppState, payload: &CreateQuoteRequest) -> Result<QuoteDraft, AppError> {
    let mut draft = QuoteDraft::new(ClientInfo {
        company_id: payload.company_id,
        contact_id: payload.contact_id,
        client_name: payload.client_name.clone(),
        client_address: payload.client_address.clone(),
        client_siret: payload.client_siret.clone(),
        client_vat_number: payload.client_vat_number.clone(),
    });
    draft.global_discount_percent = payload.discount_percent;
    draft.vat_rate = VatRate::try_from(payload.vat_rate)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;
    draft.notes = payload.notes.clone();
    draft.conditions = payload.conditions.clone();

    for line in &payload.lines {
        match line {
            QuoteLineRequest::CatalogItem {
                item_id,
                quantity,
                discount_percent,
            } => {
                let item = state.catalog.item(item_id).ok_or_else(|| {
                    AppError::NotFound(anyhow::anyhow!("Catalog item '{}' not found", item_id))
                })?;
                let id = draft
                    .add_from_catalog_item(&state.catalog, item)
                    .ok_or_else(|| {
                        AppError::BadRequest(anyhow::anyhow!(
                            "Item '{}' is priced on request; add it as a custom line with a price",
                            item_id
                        ))
                    })?;
                draft.update_line(
                    id,
                    LineUpdate {
                        quantity: *quantity,
                        discount_percent: *discount_percent,
                        ..Default::default()
                    },
                );
            }
            QuoteLineRequest::Pack { pack_id, quantity } => {
                let pack = state.catalog.pack(pack_id).ok_or_else(|| {
                    AppError::NotFound(anyhow::anyhow!("Pack '{}' not found", pack_id))
                })?;
                let id = draft.add_from_pack(pack);
                draft.update_line(
                    id,
                    LineUpdate {
                        quantity: *quantity,
                        ..Default::default()
                    },
                );
            }
            QuoteLineRequest::Custom {
                label,
                description,
                quantity,
                unit_price,
                discount_percent,
                unit_label,
                section,
            } => {
                let id = draft.add_custom_line();
                draft.update_line(
                    id,
                    LineUpdate {
                        label: Some(label.clone()),
                        description: description.clone(),
                        quantity: *quantity,
                        unit_price: Some(*unit_price),
                        discount_percent: *discount_percent,
                        unit_label: unit_label.clone(),
                        section: section.clone(),
                    },
                );
            }
        }
    }

    draft.validate().map_err(|issues| {
        let details = issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::BadRequest(anyhow::anyhow!(details))
    })?;

    Ok(draft)
}

pub async fn create_quote(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let draft = build_draft(&state, &payload)?;
    let totals = draft.quote_totals();

    let input = CreateQuote {
        quote_id: payload.quote_id,
        company_id: draft.client.company_id,
        contact_id: draft.client.contact_id,
        client_name: draft.client.client_name.clone(),
        client_address: draft.client.client_address.clone(),
        client_siret: draft.client.client_siret.clone(),
        client_vat_number: draft.client.client_vat_number.clone(),
        discount_percent: draft.global_discount_percent,
        vat_rate: draft.vat_rate.percent(),
        total_ht: totals.net_total,
        discount_amount: totals.discount_amount,
        total_after_discount: totals.net_after_discount,
        total_vat: totals.vat_amount,
        total_ttc: totals.gross_total,
        notes: draft.notes.clone(),
        conditions: draft.conditions.clone(),
    };

    let lines: Vec<CreateQuoteLine> = draft
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| CreateQuoteLine {
            line_id: line.id,
            sort_order: i as i32,
            catalog_item_id: line.catalog_item_id.clone(),
            label: line.label.clone(),
            description: if line.description.is_empty() {
                None
            } else {
                Some(line.description.clone())
            },
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount_percent: line.discount_percent,
            total_ht: line.total(),
            unit_label: line.unit_label.clone(),
            section: if line.section.is_empty() {
                None
            } else {
                Some(line.section.clone())
            },
        })
        .collect();

    let creation = state.db.create_quote(&input, &lines).await?;
    // Idempotent replays return the stored row without creating anything.
    if creation.is_new() {
        QUOTES_TOTAL.with_label_values(&["draft"]).inc();
    }
    let quote = creation.into_quote();

    let stored_lines = state.db.get_quote_lines(quote.quote_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuoteWithLinesResponse {
            quote: QuoteResponse::from(quote),
            lines: stored_lines.into_iter().map(QuoteLineResponse::from).collect(),
        }),
    ))
}

pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListQuotesParams>,
) -> Result<impl IntoResponse, AppError> {
    // Lapsed validity windows are applied lazily, on read.
    state.db.expire_overdue_quotes().await?;

    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let filter = ListQuotesFilter {
        status: params.status,
        company_id: params.company_id,
        contact_id: params.contact_id,
        page_size,
        page_token: params.page_token,
    };

    let quotes = state.db.list_quotes(&filter).await?;
    let next_page_token = if quotes.len() as i32 == page_size.clamp(1, 100) {
        quotes.last().map(|q| q.quote_id)
    } else {
        None
    };

    Ok(Json(ListQuotesResponse {
        quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
        next_page_token,
    }))
}

pub async fn get_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.db.expire_overdue_quotes().await?;

    let quote = state
        .db
        .get_quote(quote_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote not found")))?;
    let lines = state.db.get_quote_lines(quote_id).await?;

    Ok(Json(QuoteWithLinesResponse {
        quote: QuoteResponse::from(quote),
        lines: lines.into_iter().map(QuoteLineResponse::from).collect(),
    }))
}

pub async fn update_quote_status(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
    Json(payload): Json<UpdateQuoteStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quote = state
        .db
        .update_quote_status(quote_id, payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote not found")))?;

    QUOTES_TOTAL.with_label_values(&[&quote.status]).inc();
    if quote.status() == QuoteStatus::Accepted {
        QUOTE_AMOUNT_TOTAL
            .with_label_values(&["accepted"])
            .inc_by(quote.total_ttc.to_f64().unwrap_or(0.0));
    }

    Ok(Json(QuoteResponse::from(quote)))
}

pub async fn delete_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.db.delete_quote(quote_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Quote not found")))
    }
}

pub async fn duplicate_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let copy = state
        .db
        .duplicate_quote(quote_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote not found")))?;

    QUOTES_TOTAL.with_label_values(&["draft"]).inc();

    let lines = state.db.get_quote_lines(copy.quote_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuoteWithLinesResponse {
            quote: QuoteResponse::from(copy),
            lines: lines.into_iter().map(QuoteLineResponse::from).collect(),
        }),
    ))
}

/// Render the quote as a PDF. The document is produced from the stored
/// totals and line snapshots only, so the output never drifts from what was
/// persisted, whatever happened to the catalog since.
pub async fn download_quote_pdf(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quote = state
        .db
        .get_quote(quote_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote not found")))?;
    let lines = state.db.get_quote_lines(quote_id).await?;

    let timer = PDF_RENDER_DURATION.start_timer();
    let document = pdf::build_document(&state.config.issuer, &quote, &lines);
    let bytes = pdf::write_pdf(&document)?;
    timer.observe_duration();

    tracing::info!(
        quote_id = %quote_id,
        reference = %document.reference,
        size = bytes.len(),
        "Quote PDF rendered"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}.pdf\"", document.reference),
            ),
        ],
        bytes,
    ))
}
