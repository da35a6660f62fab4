//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::metrics::ToolStats;
use crate::ratelimit::RateUsage;
use crate::search::{LocalSearchArgs, WebSearchArgs};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match &self {
            SearchError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            SearchError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            SearchError::Upstream { .. } | SearchError::Transport(_) | SearchError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// Web search tool handler
pub async fn web_search(
    State(state): State<AppState>,
    Query(args): Query<WebSearchArgs>,
) -> Result<String, SearchError> {
    state.tools.web_search(args).await
}

/// Local search tool handler
pub async fn local_search(
    State(state): State<AppState>,
    Query(args): Query<LocalSearchArgs>,
) -> Result<String, SearchError> {
    state.tools.local_search(args).await
}

/// Stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub rate_limit: RateUsage,
    pub total_calls: u64,
    pub fallbacks: u64,
    pub tools: Vec<ToolStats>,
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let metrics = state.tools.metrics();
    Json(StatsResponse {
        rate_limit: state.tools.client().limiter().usage(),
        total_calls: metrics.total_calls(),
        fallbacks: metrics.fallbacks(),
        tools: metrics.get_stats(),
    })
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
