use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentinel_core::SentinelError;
use sentinel_llm::LlmError;

// ---------------------------------------------------------------------------
// Internal sentinel for client-side request errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry a 4xx status through the
/// `anyhow::Error` chain.
#[derive(Debug)]
struct RequestError {
    status: StatusCode,
    message: String,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RequestError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Bodies are `{"error": <message>, "code": <code>}`. Provider and tool
/// failure detail is logged server-side and replaced with a generic message.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Keep the extractor's status (400/415/422) but use our body shape.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        Self(
            RequestError {
                status: rejection.status(),
                message: rejection.body_text(),
            }
            .into(),
        )
    }

    /// Status, stable error code and caller-facing message.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        if let Some(r) = self.0.downcast_ref::<RequestError>() {
            return (r.status, "invalid_request", r.message.clone());
        }

        let Some(err) = self.0.downcast_ref::<SentinelError>() else {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error".into(),
            );
        };

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        match err {
            SentinelError::InvalidConfig(_) => (status, "invalid_config", err.to_string()),
            SentinelError::Llm(LlmError::MissingApiKey(_)) => {
                (status, "missing_credential", err.to_string())
            }
            SentinelError::Llm(_) => (status, "internal", "internal server error".into()),
            SentinelError::Step {
                step,
                source: LlmError::InvalidJson { .. } | LlmError::EmptyResponse,
            } => (
                status,
                "invalid_model_json",
                format!("model did not return valid JSON ({step} step)"),
            ),
            SentinelError::Step { step, .. } => (
                status,
                "upstream_failure",
                format!("model provider call failed during {step} step"),
            ),
            SentinelError::UnexpectedShape { .. } => {
                (status, "unexpected_model_output", err.to_string())
            }
            SentinelError::Tool(_) => (status, "tool_failure", "tool call failed".into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        if status.is_server_error() {
            tracing::error!(code, error = %format!("{:#}", self.0), "request failed");
        } else {
            tracing::debug!(code, error = %self.0, "request rejected");
        }

        let body = serde_json::json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
