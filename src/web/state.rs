//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::ratelimit::RateLimiter;
use crate::search::{BraveSearch, SearchClient};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search tools
    pub tools: BraveSearch,
}

impl AppState {
    /// Create new application state from validated settings
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let limiter = RateLimiter::from_settings(&settings.rate_limit);
        let search_client = SearchClient::from_settings(&settings, client, limiter)?;

        Ok(Self::with_tools(settings, BraveSearch::new(search_client)))
    }

    /// Create state around existing tools
    pub fn with_tools(settings: Settings, tools: BraveSearch) -> Self {
        Self {
            settings: Arc::new(settings),
            tools,
        }
    }
}
