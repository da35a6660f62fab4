//! Search module
//!
//! Query validation, the rate-limited API client, local search
//! orchestration, and the tool entry points built on them.

mod api;
mod client;
mod executor;
mod local;
mod models;

pub use api::{Descriptions, PoiResponse, WebSearchResponse};
pub use client::{LocationId, SearchClient};
pub use executor::{BraveSearch, LOCAL_SEARCH_TOOL, WEB_SEARCH_TOOL};
pub use local::{LocalSearch, LocalSearchOutcome, LocationDiscovery};
pub use models::{
    Category, Freshness, LocalQuery, LocalSearchArgs, ResultType, SafetyLevel, SearchQuery,
    WebSearchArgs, MAX_QUERY_CHARS,
};
