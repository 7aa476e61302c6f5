//! Database service for quoting-service.

use crate::models::{
    Company, Contact, CreateQuote, CreateQuoteLine, ListQuotesFilter, Quote, QuoteCreation,
    QuoteLine, QuoteStatus,
};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const QUOTE_COLUMNS: &str = "quote_id, reference, status, company_id, contact_id, client_name, \
    client_address, client_siret, client_vat_number, discount_percent, vat_rate, total_ht, \
    discount_amount, total_after_discount, total_vat, total_ttc, notes, conditions, \
    created_utc, updated_utc, issued_utc, valid_until, accepted_utc";

const QUOTE_LINE_COLUMNS: &str = "line_id, quote_id, sort_order, catalog_item_id, label, \
    description, quantity, unit_price, discount_percent, total_ht, unit_label, section, \
    created_utc";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "quoting-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Quote Operations
    // -------------------------------------------------------------------------

    /// Persist a finalized draft and its line snapshots in one transaction.
    ///
    /// The quote id is client-supplied; a replay of the same id returns the
    /// already stored quote without touching its lines.
    #[instrument(skip(self, input, lines), fields(quote_id = %input.quote_id))]
    pub async fn create_quote(
        &self,
        input: &CreateQuote,
        lines: &[CreateQuoteLine],
    ) -> Result<QuoteCreation, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_quote"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let inserted = sqlx::query_as::<_, Quote>(&format!(
            r#"
            INSERT INTO quotes (
                quote_id, reference, status, company_id, contact_id, client_name,
                client_address, client_siret, client_vat_number, discount_percent, vat_rate,
                total_ht, discount_amount, total_after_discount, total_vat, total_ttc,
                notes, conditions
            )
            VALUES ($1, next_quote_reference(), 'draft', $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (quote_id) DO NOTHING
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(input.quote_id)
        .bind(input.company_id)
        .bind(input.contact_id)
        .bind(&input.client_name)
        .bind(&input.client_address)
        .bind(&input.client_siret)
        .bind(&input.client_vat_number)
        .bind(input.discount_percent)
        .bind(input.vat_rate)
        .bind(input.total_ht)
        .bind(input.discount_amount)
        .bind(input.total_after_discount)
        .bind(input.total_vat)
        .bind(input.total_ttc)
        .bind(&input.notes)
        .bind(&input.conditions)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create quote: {}", e)))?;

        let creation = match inserted {
            Some(quote) => {
                for line in lines {
                    sqlx::query(
                        r#"
                        INSERT INTO quote_lines (
                            line_id, quote_id, sort_order, catalog_item_id, label, description,
                            quantity, unit_price, discount_percent, total_ht, unit_label, section
                        )
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                        "#,
                    )
                    .bind(line.line_id)
                    .bind(quote.quote_id)
                    .bind(line.sort_order)
                    .bind(&line.catalog_item_id)
                    .bind(&line.label)
                    .bind(&line.description)
                    .bind(line.quantity)
                    .bind(line.unit_price)
                    .bind(line.discount_percent)
                    .bind(line.total_ht)
                    .bind(&line.unit_label)
                    .bind(&line.section)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(anyhow::anyhow!(
                            "Failed to insert quote line: {}",
                            e
                        ))
                    })?;
                }

                tx.commit().await.map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to commit: {}", e))
                })?;

                info!(
                    quote_id = %quote.quote_id,
                    reference = %quote.reference,
                    lines = lines.len(),
                    "Quote created"
                );

                QuoteCreation::Created(quote)
            }
            // Replayed submission: the row already exists with its lines.
            None => {
                tx.rollback().await.map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to rollback: {}", e))
                })?;

                let existing = self.get_quote(input.quote_id).await?.ok_or_else(|| {
                    AppError::DatabaseError(anyhow::anyhow!(
                        "Quote {} conflicted but is not readable",
                        input.quote_id
                    ))
                })?;

                QuoteCreation::Replayed(existing)
            }
        };

        timer.observe_duration();

        Ok(creation)
    }

    /// Get a quote by ID.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn get_quote(&self, quote_id: Uuid) -> Result<Option<Quote>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_quote"])
            .start_timer();

        let quote = sqlx::query_as::<_, Quote>(&format!(
            r#"
            SELECT {QUOTE_COLUMNS}
            FROM quotes
            WHERE quote_id = $1
            "#
        ))
        .bind(quote_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get quote: {}", e)))?;

        timer.observe_duration();

        Ok(quote)
    }

    /// Get the line snapshots of a quote, in display order.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn get_quote_lines(&self, quote_id: Uuid) -> Result<Vec<QuoteLine>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_quote_lines"])
            .start_timer();

        let lines = sqlx::query_as::<_, QuoteLine>(&format!(
            r#"
            SELECT {QUOTE_LINE_COLUMNS}
            FROM quote_lines
            WHERE quote_id = $1
            ORDER BY sort_order, created_utc
            "#
        ))
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get quote lines: {}", e))
        })?;

        timer.observe_duration();

        Ok(lines)
    }

    /// List quotes with optional status, company and contact filters.
    #[instrument(skip(self, filter))]
    pub async fn list_quotes(&self, filter: &ListQuotesFilter) -> Result<Vec<Quote>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_quotes"])
            .start_timer();

        let limit = filter.page_size.clamp(1, 100) as i64;
        let status_str = filter.status.map(|s| s.as_str().to_string());

        let quotes = if let Some(cursor) = filter.page_token {
            sqlx::query_as::<_, Quote>(&format!(
                r#"
                SELECT {QUOTE_COLUMNS}
                FROM quotes
                WHERE ($1::varchar IS NULL OR status = $1)
                  AND ($2::uuid IS NULL OR company_id = $2)
                  AND ($3::uuid IS NULL OR contact_id = $3)
                  AND quote_id > $4
                ORDER BY quote_id
                LIMIT $5
                "#
            ))
            .bind(&status_str)
            .bind(filter.company_id)
            .bind(filter.contact_id)
            .bind(cursor)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, Quote>(&format!(
                r#"
                SELECT {QUOTE_COLUMNS}
                FROM quotes
                WHERE ($1::varchar IS NULL OR status = $1)
                  AND ($2::uuid IS NULL OR company_id = $2)
                  AND ($3::uuid IS NULL OR contact_id = $3)
                ORDER BY quote_id
                LIMIT $4
                "#
            ))
            .bind(&status_str)
            .bind(filter.company_id)
            .bind(filter.contact_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list quotes: {}", e)))?;

        timer.observe_duration();

        Ok(quotes)
    }

    /// Advance a quote along its lifecycle. Illegal transitions are rejected
    /// with a conflict; moving to sent stamps issuance and a 30 day validity
    /// window, moving to accepted stamps the acceptance time.
    #[instrument(skip(self), fields(quote_id = %quote_id, next = %next.as_str()))]
    pub async fn update_quote_status(
        &self,
        quote_id: Uuid,
        next: QuoteStatus,
    ) -> Result<Option<Quote>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_quote_status"])
            .start_timer();

        let existing = match self.get_quote(quote_id).await? {
            Some(quote) => quote,
            None => return Ok(None),
        };

        let current = existing.status();
        if !current.can_transition_to(next) {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Cannot move quote from {} to {}",
                current.as_str(),
                next.as_str()
            )));
        }

        let quote = sqlx::query_as::<_, Quote>(&format!(
            r#"
            UPDATE quotes
            SET status = $2,
                updated_utc = NOW(),
                issued_utc = CASE WHEN $2 = 'sent' THEN NOW() ELSE issued_utc END,
                valid_until = CASE WHEN $2 = 'sent' THEN NOW() + INTERVAL '30 days' ELSE valid_until END,
                accepted_utc = CASE WHEN $2 = 'accepted' THEN NOW() ELSE accepted_utc END
            WHERE quote_id = $1 AND status = $3
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(quote_id)
        .bind(next.as_str())
        .bind(current.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update quote status: {}", e))
        })?;

        timer.observe_duration();

        match quote {
            Some(q) => {
                info!(quote_id = %q.quote_id, status = %q.status, "Quote status updated");
                Ok(Some(q))
            }
            // The guarded UPDATE matched no row: either the quote is gone or
            // a concurrent transition moved it off `current` first.
            None => raced_transition(self.get_quote(quote_id).await?, next),
        }
    }

    /// Delete a draft quote and its lines.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn delete_quote(&self, quote_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_quote"])
            .start_timer();

        let existing = match self.get_quote(quote_id).await? {
            Some(quote) => quote,
            None => return Ok(false),
        };
        if !existing.status().is_mutable() {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Only draft quotes can be deleted"
            )));
        }

        let result = sqlx::query(
            r#"
            DELETE FROM quotes
            WHERE quote_id = $1 AND status = 'draft'
            "#,
        )
        .bind(quote_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete quote: {}", e)))?;

        timer.observe_duration();

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(quote_id = %quote_id, "Draft quote deleted");
        }

        Ok(deleted)
    }

    /// Clone a quote into a fresh draft with a new reference. Lifecycle
    /// stamps are not carried over. Works from any status.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn duplicate_quote(&self, quote_id: Uuid) -> Result<Option<Quote>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["duplicate_quote"])
            .start_timer();

        if self.get_quote(quote_id).await?.is_none() {
            return Ok(None);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let new_quote_id = Uuid::new_v4();
        let copy = sqlx::query_as::<_, Quote>(&format!(
            r#"
            INSERT INTO quotes (
                quote_id, reference, status, company_id, contact_id, client_name,
                client_address, client_siret, client_vat_number, discount_percent, vat_rate,
                total_ht, discount_amount, total_after_discount, total_vat, total_ttc,
                notes, conditions
            )
            SELECT $2, next_quote_reference(), 'draft', company_id, contact_id, client_name,
                client_address, client_siret, client_vat_number, discount_percent, vat_rate,
                total_ht, discount_amount, total_after_discount, total_vat, total_ttc,
                notes, conditions
            FROM quotes
            WHERE quote_id = $1
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(quote_id)
        .bind(new_quote_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to duplicate quote: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO quote_lines (
                line_id, quote_id, sort_order, catalog_item_id, label, description,
                quantity, unit_price, discount_percent, total_ht, unit_label, section
            )
            SELECT gen_random_uuid(), $2, sort_order, catalog_item_id, label, description,
                quantity, unit_price, discount_percent, total_ht, unit_label, section
            FROM quote_lines
            WHERE quote_id = $1
            "#,
        )
        .bind(quote_id)
        .bind(new_quote_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to duplicate quote lines: {}", e))
        })?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to commit: {}", e)))?;

        timer.observe_duration();

        info!(
            source_quote_id = %quote_id,
            quote_id = %copy.quote_id,
            reference = %copy.reference,
            "Quote duplicated"
        );

        Ok(Some(copy))
    }

    /// Flip every sent quote whose validity window has lapsed to expired.
    /// Returns the number of quotes expired.
    #[instrument(skip(self))]
    pub async fn expire_overdue_quotes(&self) -> Result<u64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["expire_overdue_quotes"])
            .start_timer();

        let result = sqlx::query(
            r#"
            UPDATE quotes
            SET status = 'expired',
                updated_utc = NOW()
            WHERE status = 'sent'
              AND valid_until IS NOT NULL
              AND valid_until < NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to expire quotes: {}", e)))?;

        timer.observe_duration();

        let expired = result.rows_affected();
        if expired > 0 {
            info!(expired = expired, "Overdue quotes expired");
        }

        Ok(expired)
    }

    // -------------------------------------------------------------------------
    // Company and Contact Operations
    // -------------------------------------------------------------------------

    /// List all companies, for the in-memory fuzzy matcher.
    #[instrument(skip(self))]
    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_companies"])
            .start_timer();

        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT company_id, name, address, city, siret, vat_number, created_utc
            FROM companies
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list companies: {}", e)))?;

        timer.observe_duration();

        Ok(companies)
    }

    /// List all contacts, for the in-memory fuzzy matcher.
    #[instrument(skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_contacts"])
            .start_timer();

        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT contact_id, company_id, first_name, last_name, email, created_utc
            FROM contacts
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list contacts: {}", e)))?;

        timer.observe_duration();

        Ok(contacts)
    }
}

/// Resolve a status update whose compare-and-swap matched no row. A quote
/// that still exists lost the race to a concurrent transition and must
/// surface as a conflict, not as a missing quote.
fn raced_transition(fresh: Option<Quote>, next: QuoteStatus) -> Result<Option<Quote>, AppError> {
    match fresh {
        Some(quote) => Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot move quote from {} to {}",
            quote.status,
            next.as_str()
        ))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn quote_with_status(status: &str) -> Quote {
        let now = Utc::now();
        Quote {
            quote_id: Uuid::new_v4(),
            reference: "DEV-2026-007".to_string(),
            status: status.to_string(),
            company_id: None,
            contact_id: None,
            client_name: "Garage Morel".to_string(),
            client_address: None,
            client_siret: None,
            client_vat_number: None,
            discount_percent: Decimal::ZERO,
            vat_rate: Decimal::new(20, 0),
            total_ht: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total_after_discount: Decimal::ZERO,
            total_vat: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            notes: None,
            conditions: None,
            created_utc: now,
            updated_utc: now,
            issued_utc: Some(now),
            valid_until: Some(now),
            accepted_utc: None,
        }
    }

    #[test]
    fn test_raced_transition_on_surviving_quote_is_a_conflict() {
        // Another caller accepted the quote between the guard check and the
        // compare-and-swap UPDATE.
        let result = raced_transition(Some(quote_with_status("accepted")), QuoteStatus::Declined);

        match result {
            Err(AppError::Conflict(e)) => {
                let message = e.to_string();
                assert!(message.contains("accepted"), "got: {}", message);
                assert!(message.contains("declined"), "got: {}", message);
            }
            other => panic!("expected a conflict, got {:?}", other.map(|q| q.is_some())),
        }
    }

    #[test]
    fn test_raced_transition_on_deleted_quote_stays_not_found() {
        let result = raced_transition(None, QuoteStatus::Sent);
        assert!(matches!(result, Ok(None)));
    }
}
