//! `sentinel-llm` — typed remote-call interface to LLM completion providers.
//!
//! # Architecture
//!
//! ```text
//! LlmSettings
//!     │
//!     ▼
//! connect()        ← picks a provider, checks credentials up front
//!     │
//!     ▼
//! RetryingClient   ← bounded exponential backoff on transient failures
//!     │
//!     ▼
//! AnthropicClient / OllamaClient   ← one HTTP round trip, temperature 0.0
//!     │
//!     ▼
//! decode_json()    ← the only place reply text becomes JSON
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sentinel_llm::{connect, CompletionRequest, LlmSettings};
//!
//! let client = connect(&LlmSettings {
//!     api_key: Some(key),
//!     ..Default::default()
//! })?;
//! let value = client
//!     .complete_json(&CompletionRequest {
//!         system: "Respond with JSON.".into(),
//!         prompt: "{\"ping\": true}".into(),
//!         max_tokens: 200,
//!     })
//!     .await?;
//! ```

pub mod anthropic;
pub mod client;
pub mod decode;
pub mod error;
pub mod ollama;
pub mod retry;
pub mod types;


use std::sync::Arc;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use decode::decode_json;
pub use error::LlmError;
pub use ollama::OllamaClient;
pub use retry::{RetryPolicy, RetryingClient};
pub use types::{CompletionRequest, LlmSettings, Provider, ANTHROPIC_API_KEY_VAR};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Open a client for the configured provider, wrapped in the retry policy.
///
/// Fails with [`LlmError::MissingApiKey`] before any network traffic when the
/// provider needs a credential and none was supplied.
pub fn connect(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>> {
    match settings.provider {
        Provider::Anthropic => {
            let api_key = settings
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| LlmError::MissingApiKey(ANTHROPIC_API_KEY_VAR.into()))?;
            let client = AnthropicClient::new(
                api_key,
                settings.model(),
                settings.base_url(),
                settings.timeout,
            )?;
            Ok(Arc::new(RetryingClient::new(client, settings.retry)))
        }
        Provider::Ollama => {
            let client = OllamaClient::new(settings.model(), settings.base_url(), settings.timeout)?;
            Ok(Arc::new(RetryingClient::new(client, settings.retry)))
        }
    }
}
