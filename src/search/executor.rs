//! The exposed search tools

use super::client::SearchClient;
use super::local::LocalSearch;
use super::models::{LocalQuery, LocalSearchArgs, SearchQuery, WebSearchArgs};
use crate::error::ToolResult;
use crate::metrics::Metrics;
use std::sync::Arc;
use tracing::{info, warn};

pub const WEB_SEARCH_TOOL: &str = "web_search";
pub const LOCAL_SEARCH_TOOL: &str = "local_search";

/// Entry point for the `web_search` and `local_search` tools.
///
/// Clones share the client, the rate limiter behind it, and the metrics.
#[derive(Clone)]
pub struct BraveSearch {
    client: Arc<SearchClient>,
    metrics: Arc<Metrics>,
}

impl BraveSearch {
    pub fn new(client: SearchClient) -> Self {
        Self {
            client: Arc::new(client),
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn client(&self) -> &SearchClient {
        &self.client
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Search the web, news, and videos.
    ///
    /// Returns formatted result blocks, or `"No results found"`.
    pub async fn web_search(&self, args: WebSearchArgs) -> ToolResult<String> {
        self.metrics.record_call(WEB_SEARCH_TOOL);
        info!(query = %args.query, result_type = %args.result_type, "web_search invoked");

        let outcome = match SearchQuery::validate(&args) {
            Ok(query) => self.client.web_search(&query).await,
            Err(e) => Err(e),
        };
        self.observe(WEB_SEARCH_TOOL, outcome)
    }

    /// Search for local businesses and places, falling back to web search
    /// when no location matches.
    pub async fn local_search(&self, args: LocalSearchArgs) -> ToolResult<String> {
        self.metrics.record_call(LOCAL_SEARCH_TOOL);
        info!(query = %args.query, "local_search invoked");

        let outcome = match LocalQuery::validate(&args) {
            Ok(query) => LocalSearch::new(&self.client).run(&query).await,
            Err(e) => Err(e),
        };
        let outcome = outcome.map(|outcome| {
            if outcome.is_fallback() {
                self.metrics.record_fallback();
            }
            outcome.into_text()
        });
        self.observe(LOCAL_SEARCH_TOOL, outcome)
    }

    fn observe(&self, tool: &str, outcome: ToolResult<String>) -> ToolResult<String> {
        if let Err(e) = &outcome {
            warn!(tool, kind = e.kind(), "Tool call failed: {}", e);
            self.metrics.record_error(tool, e.kind());
        }
        outcome
    }
}
