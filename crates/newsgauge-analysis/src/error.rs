use std::time::Duration;

use newsgauge_core::Retriable;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analysis request timed out after {0:?}")]
    Timeout(Duration),

    #[error("analysis API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("analysis API returned no content")]
    EmptyResponse,

    /// The service answered, but not in the shape the caller needs.
    #[error("malformed {context} response: {reason}")]
    Format { context: String, reason: String },
}

impl AnalysisError {
    pub(crate) fn format(context: &str, reason: impl Into<String>) -> Self {
        AnalysisError::Format {
            context: context.to_owned(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, AnalysisError::Format { .. })
    }
}

impl Retriable for AnalysisError {
    /// Transport failures, 429 and 5xx are retried. Format errors never
    /// are: re-asking hides a prompt or parsing problem.
    fn is_retriable(&self) -> bool {
        match self {
            AnalysisError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            AnalysisError::Timeout(_) | AnalysisError::EmptyResponse => true,
            AnalysisError::Api { status, .. } => *status == 429 || *status >= 500,
            AnalysisError::Format { .. } => false,
        }
    }

    fn timed_out(after: Duration) -> Self {
        AnalysisError::Timeout(after)
    }
}
