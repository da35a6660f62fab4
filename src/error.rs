//! Error types shared by the search tools

use thiserror::Error;

/// Failure of a search tool invocation
#[derive(Debug, Error)]
pub enum SearchError {
    /// A caller-supplied parameter violates a documented constraint
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// The per-second or per-period quota is exhausted
    #[error("Rate limit exceeded ({window} limit of {limit} reached)")]
    RateLimitExceeded { window: &'static str, limit: u64 },

    /// The API answered with a non-success status
    #[error("Brave API error: {status} {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout)
    #[error("Brave API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not the expected JSON
    #[error("Brave API returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// Stable label used in logs, metrics and the tool surface
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::RateLimitExceeded { .. } => "rate_limit_exceeded",
            Self::Upstream { .. } | Self::Transport(_) | Self::Decode(_) => "upstream_error",
        }
    }
}

/// Result alias for search operations
pub type ToolResult<T> = std::result::Result<T, SearchError>;
