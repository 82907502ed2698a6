use std::time::Duration;

use anyhow::Result;
use clap::Args;
use sentinel_core::config::{PipelineSettings, DEFAULT_MAX_EVIDENCE};
use sentinel_core::SentinelConfig;
use sentinel_llm::{LlmSettings, Provider, RetryPolicy};

/// Global flags shared by every subcommand. Each falls back to an env var.
#[derive(Args, Debug, Clone)]
pub struct SentinelArgs {
    /// Model provider: anthropic or ollama
    #[arg(long, global = true, env = "SENTINEL_PROVIDER", default_value = "anthropic")]
    pub provider: Provider,

    /// Anthropic API key
    #[arg(long, global = true, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (default depends on the provider)
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true, env = "ANTHROPIC_MODEL", hide = true)]
    pub anthropic_model: Option<String>,

    #[arg(long, global = true, env = "OLLAMA_MODEL", hide = true)]
    pub ollama_model: Option<String>,

    /// Anthropic API base URL
    #[arg(long, global = true, env = "ANTHROPIC_BASE_URL")]
    pub base_url: Option<String>,

    /// Ollama host
    #[arg(long, global = true, env = "OLLAMA_HOST", default_value = "http://127.0.0.1")]
    pub ollama_host: String,

    /// Ollama port
    #[arg(long, global = true, env = "OLLAMA_PORT", default_value = "11434")]
    pub ollama_port: u16,

    /// Results below this confidence are flagged for human review
    #[arg(long, global = true, env = "CONFIDENCE_THRESHOLD", default_value = "0.6")]
    pub confidence_threshold: f64,

    /// Output-token budget for each model call
    #[arg(long, global = true, env = "SENTINEL_MAX_TOKENS", default_value = "1000")]
    pub max_tokens: u32,

    /// Per-call timeout for model requests, in seconds
    #[arg(long, global = true, env = "SENTINEL_LLM_TIMEOUT_SECS", default_value = "60")]
    pub timeout_secs: u64,

    /// Retries for transient provider failures (0 disables)
    #[arg(long, global = true, env = "SENTINEL_LLM_MAX_RETRIES", default_value = "2")]
    pub max_retries: u32,

    /// Slack incoming-webhook URL; alerts are posted after each successful run
    #[arg(long, global = true, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook_url: Option<String>,
}

impl SentinelArgs {
    /// Resolve flags into a validated config.
    pub fn into_config(self) -> Result<SentinelConfig> {
        let (model, base_url) = match self.provider {
            Provider::Anthropic => (self.model.or(self.anthropic_model), self.base_url),
            Provider::Ollama => (
                self.model.or(self.ollama_model),
                Some(ollama_base_url(&self.ollama_host, self.ollama_port)),
            ),
        };

        let config = SentinelConfig {
            llm: LlmSettings {
                provider: self.provider,
                api_key: non_blank(self.api_key),
                model: non_blank(model),
                base_url: non_blank(base_url),
                timeout: Duration::from_secs(self.timeout_secs),
                retry: RetryPolicy {
                    max_retries: self.max_retries,
                    ..RetryPolicy::default()
                },
            },
            pipeline: PipelineSettings {
                confidence_threshold: self.confidence_threshold,
                max_tokens: self.max_tokens,
                max_evidence: DEFAULT_MAX_EVIDENCE,
            },
            slack_webhook_url: non_blank(self.slack_webhook_url),
        };
        config.validate()?;
        Ok(config)
    }
}

/// `OLLAMA_HOST` may be given with or without a scheme.
fn ollama_base_url(host: &str, port: u16) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        format!("{host}:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
