//! Result types and text formatting

mod format;
mod types;

pub use format::{format_places, format_web_results, NO_DESCRIPTION, NO_LOCAL_RESULTS, NO_RESULTS};
pub use types::{PlaceAddress, PlaceResult, SearchResult};
