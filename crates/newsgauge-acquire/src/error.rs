use std::time::Duration;

use newsgauge_core::Retriable;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no article content extracted from {url}")]
    EmptyContent { url: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("acquired {obtained} of {requested} requested articles")]
    Exhausted { requested: usize, obtained: usize },
}

impl Retriable for AcquireError {
    /// Network failures, timeouts, 429 and 5xx are transient. Malformed
    /// payloads, empty pages and 4xx responses will not improve on retry.
    fn is_retriable(&self) -> bool {
        match self {
            AcquireError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            AcquireError::Timeout(_) | AcquireError::RateLimited { .. } => true,
            AcquireError::UnexpectedStatus { status, .. } => *status >= 500,
            AcquireError::Deserialize { .. }
            | AcquireError::EmptyContent { .. }
            | AcquireError::InvalidBaseUrl { .. }
            | AcquireError::Exhausted { .. } => false,
        }
    }

    fn timed_out(after: Duration) -> Self {
        AcquireError::Timeout(after)
    }
}
