//! BraveSearch-RS: a rate-limited Brave Search client exposed as search tools
//!
//! Two operations are provided, `web_search` and `local_search`, both
//! returning plain text. Every outbound API call is gated by one
//! process-wide [`RateLimiter`].

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod ratelimit;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{SearchError, ToolResult};
pub use ratelimit::RateLimiter;
pub use results::{PlaceResult, SearchResult};
pub use search::{BraveSearch, LocalSearchArgs, SearchClient, SearchQuery, WebSearchArgs};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
