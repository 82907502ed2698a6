use async_trait::async_trait;

use crate::decode::decode_json;
use crate::{CompletionRequest, LlmError, Result};

/// A remote language model that turns one prompt into one reply.
///
/// Implementations only move text; turning that text into JSON happens in
/// exactly one place, [`LlmClient::complete_json`].
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Resolved model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Run the completion and return the reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Run the completion and decode the reply as JSON.
    async fn complete_json(&self, request: &CompletionRequest) -> Result<serde_json::Value> {
        let text = self.complete(request).await?;
        decode_json(&text)
    }
}

/// Map a non-success HTTP response onto a typed error.
pub(crate) async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status().as_u16();

    if status == 429 {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
        return Err(LlmError::RateLimited { retry_after });
    }

    if status >= 400 {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "(no body)".into());
        return Err(LlmError::ApiError { status, message });
    }

    Ok(response)
}

/// Map a failure while reading or parsing a success body.
///
/// A timeout mid-body is still a timeout and stays retryable.
pub(crate) fn body_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::from(err)
    } else {
        LlmError::InvalidResponse(format!("failed to parse response: {err}"))
    }
}
