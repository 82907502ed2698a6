//! Client for a local Ollama server (`/api/generate`, non-streaming).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::client::{body_error, error_for_status, LlmClient};
use crate::{CompletionRequest, LlmError, Result};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
    /// Ollama's JSON mode: constrains decoding to a JSON document.
    pub format: &'static str,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            system: &request.system,
            prompt: &request.prompt,
            format: "json",
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                num_predict: request.max_tokens,
            },
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let response = error_for_status(response).await?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(body_error)?;

        tracing::debug!(
            model = %self.model,
            eval_count = parsed.eval_count.unwrap_or(0),
            "ollama completion finished"
        );

        match parsed.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(LlmError::EmptyResponse),
        }
    }
}
