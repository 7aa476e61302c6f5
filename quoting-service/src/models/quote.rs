//! Persisted quote model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Quote lifecycle status. Transitions are monotonic: no skipping states
/// and no going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Declined => "declined",
            QuoteStatus::Expired => "expired",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => QuoteStatus::Sent,
            "accepted" => QuoteStatus::Accepted,
            "declined" => QuoteStatus::Declined,
            "expired" => QuoteStatus::Expired,
            _ => QuoteStatus::Draft,
        }
    }

    /// Terminal states allow duplication only.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuoteStatus::Accepted | QuoteStatus::Declined | QuoteStatus::Expired
        )
    }

    /// Whether a user-initiated transition to `next` is legal. Expiry is
    /// included here because the sweep goes through the same guard.
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (QuoteStatus::Draft, QuoteStatus::Sent)
                | (QuoteStatus::Sent, QuoteStatus::Accepted)
                | (QuoteStatus::Sent, QuoteStatus::Declined)
                | (QuoteStatus::Sent, QuoteStatus::Expired)
        )
    }

    /// Lines may only be mutated, and the quote deleted, while in draft.
    pub fn is_mutable(&self) -> bool {
        matches!(self, QuoteStatus::Draft)
    }
}

/// Persisted quote. Client fields and lines are snapshots taken at creation;
/// later catalog changes never alter them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub quote_id: Uuid,
    pub reference: String,
    pub status: String,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub client_name: String,
    pub client_address: Option<String>,
    pub client_siret: Option<String>,
    pub client_vat_number: Option<String>,
    pub discount_percent: Decimal,
    pub vat_rate: Decimal,
    pub total_ht: Decimal,
    pub discount_amount: Decimal,
    pub total_after_discount: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
    pub notes: Option<String>,
    pub conditions: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
    pub issued_utc: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub accepted_utc: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn status(&self) -> QuoteStatus {
        QuoteStatus::from_string(&self.status)
    }
}

/// Outcome of persisting a draft. A retried submission with an already
/// stored quote id replays the existing row instead of creating one;
/// callers that count creations must tell the two apart.
#[derive(Debug, Clone)]
pub enum QuoteCreation {
    Created(Quote),
    Replayed(Quote),
}

impl QuoteCreation {
    pub fn is_new(&self) -> bool {
        matches!(self, QuoteCreation::Created(_))
    }

    pub fn into_quote(self) -> Quote {
        match self {
            QuoteCreation::Created(quote) | QuoteCreation::Replayed(quote) => quote,
        }
    }
}

/// Filter parameters for listing quotes.
#[derive(Debug, Clone, Default)]
pub struct ListQuotesFilter {
    pub status: Option<QuoteStatus>,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub page_size: i32,
    pub page_token: Option<Uuid>,
}

/// Input for persisting a finalized draft. The quote id comes from the
/// client so a retried submission lands on the same row.
#[derive(Debug, Clone)]
pub struct CreateQuote {
    pub quote_id: Uuid,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub client_name: String,
    pub client_address: Option<String>,
    pub client_siret: Option<String>,
    pub client_vat_number: Option<String>,
    pub discount_percent: Decimal,
    pub vat_rate: Decimal,
    pub total_ht: Decimal,
    pub discount_amount: Decimal,
    pub total_after_discount: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
    pub notes: Option<String>,
    pub conditions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sent_follows_draft() {
        assert!(QuoteStatus::Draft.can_transition_to(QuoteStatus::Sent));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Accepted));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Declined));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Expired));
    }

    #[test]
    fn test_sent_fans_out() {
        assert!(QuoteStatus::Sent.can_transition_to(QuoteStatus::Accepted));
        assert!(QuoteStatus::Sent.can_transition_to(QuoteStatus::Declined));
        assert!(QuoteStatus::Sent.can_transition_to(QuoteStatus::Expired));
        assert!(!QuoteStatus::Sent.can_transition_to(QuoteStatus::Draft));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [
            QuoteStatus::Accepted,
            QuoteStatus::Declined,
            QuoteStatus::Expired,
        ] {
            assert!(terminal.is_terminal());
            for next in [
                QuoteStatus::Draft,
                QuoteStatus::Sent,
                QuoteStatus::Accepted,
                QuoteStatus::Declined,
                QuoteStatus::Expired,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    fn sample_quote() -> Quote {
        let now = Utc::now();
        Quote {
            quote_id: Uuid::new_v4(),
            reference: "DEV-2026-001".to_string(),
            status: "draft".to_string(),
            company_id: None,
            contact_id: None,
            client_name: "Boulangerie Martin".to_string(),
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
            issued_utc: None,
            valid_until: None,
            accepted_utc: None,
        }
    }

    #[test]
    fn test_replayed_creation_is_not_new() {
        let quote = sample_quote();
        let id = quote.quote_id;

        let created = QuoteCreation::Created(quote.clone());
        assert!(created.is_new());
        assert_eq!(created.into_quote().quote_id, id);

        let replayed = QuoteCreation::Replayed(quote);
        assert!(!replayed.is_new());
        assert_eq!(replayed.into_quote().quote_id, id);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            QuoteStatus::Draft,
            QuoteStatus::Sent,
            QuoteStatus::Accepted,
            QuoteStatus::Declined,
            QuoteStatus::Expired,
        ] {
            assert_eq!(QuoteStatus::from_string(status.as_str()), status);
        }
    }
}
