pub mod catalog;
pub mod health;
pub mod quotes;
pub mod search;

pub use catalog::{list_categories, list_items, list_packs, list_subcategories, search_items};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use quotes::{
    create_quote, delete_quote, download_quote_pdf, duplicate_quote, get_quote, list_quotes,
    update_quote_status,
};
pub use search::{search_companies, search_contacts};
