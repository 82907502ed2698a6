use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} not set")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request to model provider timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("model returned no text content")]
    EmptyResponse,

    #[error("model did not return valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LlmError {
    /// Whether the failure is worth another attempt against the same provider.
    ///
    /// Connection failures, timeouts, rate limits and 5xx (including
    /// Anthropic's 529 "overloaded") are transient. Everything else, notably
    /// auth failures and undecodable replies, is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Timeout | LlmError::RateLimited { .. } => true,
            LlmError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::MissingApiKey(_)
            | LlmError::InvalidResponse(_)
            | LlmError::EmptyResponse
            | LlmError::InvalidJson { .. } => false,
        }
    }

    /// Provider-requested wait before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited {
                retry_after: Some(secs),
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(err)
        }
    }
}
