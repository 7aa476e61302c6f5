pub mod catalog;
pub mod quotes;
pub mod search;

pub use catalog::{CatalogSearchParams, ItemsParams, PacksParams, SubcategoriesParams};
pub use quotes::{
    CreateQuoteRequest, ListQuotesParams, ListQuotesResponse, QuoteLineRequest, QuoteLineResponse,
    QuoteResponse, QuoteWithLinesResponse, UpdateQuoteStatusRequest,
};
pub use search::{CompanyMatch, ContactMatch, SearchParams};
