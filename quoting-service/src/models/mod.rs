//! Domain models for quoting-service.

mod company;
mod quote;
mod quote_line;

pub use company::{Company, Contact};
pub use quote::{CreateQuote, ListQuotesFilter, Quote, QuoteCreation, QuoteStatus};
pub use quote_line::{CreateQuoteLine, QuoteLine};
