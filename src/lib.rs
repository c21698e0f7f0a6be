//! Fetch a single web page and turn it into a structured, bounded summary.
//!
//! - [`fetchers`] normalizes the URL and performs one bounded GET
//! - [`extract`] parses the HTML into an [`ExtractionResult`]
//! - [`mod@refine`] projects that into a storage-safe [`RefinedRecord`]
//! - [`store`] defines where refined records are persisted

pub mod config;
pub mod error;
pub mod extract;
pub mod fetchers;
pub mod normalize;
pub mod pipeline;
pub mod refine;
pub mod results;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{FetchConfig, ScraperConfig};
pub use error::{FetchError, StoreError};
pub use extract::Extractor;
pub use normalize::{NormalizedUrl, normalize};
pub use pipeline::{Scraper, save};
pub use refine::{refine, refine_payload};
pub use results::{ExtractionResult, FetchResult, RefinedRecord};
