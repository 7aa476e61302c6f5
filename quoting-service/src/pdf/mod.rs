//! Quote document rendering: content assembly then PDF layout.

pub mod document;
pub mod format;
pub mod writer;

pub use document::{build_document, QuoteDocument};
pub use writer::write_pdf;
