use sentinel_llm::LlmSettings;

use crate::error::{Result, SentinelError};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_MAX_EVIDENCE: usize = 6;

// ---------------------------------------------------------------------------
// PipelineSettings
// ---------------------------------------------------------------------------

/// Knobs the pipeline reads on every run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    /// Results below this confidence are flagged for human review.
    pub confidence_threshold: f64,
    /// Output-token budget for each model call.
    pub max_tokens: u32,
    /// Retrieved items kept for the diagnose step and the result.
    pub max_evidence: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_evidence: DEFAULT_MAX_EVIDENCE,
        }
    }
}

// ---------------------------------------------------------------------------
// SentinelConfig
// ---------------------------------------------------------------------------

/// Process-wide configuration, built once by the binary and passed down.
#[derive(Debug, Clone, Default)]
pub struct SentinelConfig {
    pub llm: LlmSettings,
    pub pipeline: PipelineSettings,
    /// Slack incoming-webhook URL for run alerts.
    pub slack_webhook_url: Option<String>,
}

impl SentinelConfig {
    /// Check values that would otherwise surface as confusing run failures.
    ///
    /// A missing API key is not checked here; the server still starts and
    /// answers health checks without one.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.pipeline.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SentinelError::InvalidConfig(format!(
                "confidence threshold must be within 0.0..=1.0, got {threshold}"
            )));
        }
        if self.pipeline.max_tokens == 0 {
            return Err(SentinelError::InvalidConfig(
                "max_tokens must be greater than zero".into(),
            ));
        }
        if self.pipeline.max_evidence == 0 {
            return Err(SentinelError::InvalidConfig(
                "max_evidence must be greater than zero".into(),
            ));
        }
        if self.llm.timeout.is_zero() {
            return Err(SentinelError::InvalidConfig(
                "model call timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
