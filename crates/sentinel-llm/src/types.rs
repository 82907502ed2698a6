use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Environment variable that conventionally carries the Anthropic key.
/// Used in the "not set" error so operators know what to export.
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://127.0.0.1:11434";

// ─── Provider ─────────────────────────────────────────────────────────────

/// Which completion backend to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Anthropic,
    Ollama,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Ollama => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            Provider::Ollama => DEFAULT_OLLAMA_MODEL,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => DEFAULT_ANTHROPIC_BASE_URL,
            Provider::Ollama => DEFAULT_OLLAMA_BASE_URL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "ollama" => Ok(Provider::Ollama),
            other => Err(format!(
                "unknown provider '{other}': expected 'anthropic' or 'ollama'"
            )),
        }
    }
}

// ─── LlmSettings ──────────────────────────────────────────────────────────

/// Everything needed to open a client against one provider.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: Provider,
    /// Required for Anthropic, ignored by Ollama.
    pub api_key: Option<String>,
    /// `None` selects the provider default.
    pub model: Option<String>,
    /// `None` selects the provider default.
    pub base_url: Option<String>,
    /// Per-call timeout applied to every HTTP request.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model: None,
            base_url: None,
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

impl LlmSettings {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

// ─── CompletionRequest ────────────────────────────────────────────────────

/// A single-turn completion: one system prompt, one user message.
///
/// Temperature is not configurable; every provider is driven with 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}
