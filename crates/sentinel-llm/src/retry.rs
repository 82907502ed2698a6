use std::time::Duration;

use async_trait::async_trait;

use crate::client::LlmClient;
use crate::{CompletionRequest, LlmError, Result};

// ─── RetryPolicy ──────────────────────────────────────────────────────────

/// Bounded exponential backoff for transient provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `0` disables retrying.
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Upper bound on any single wait, including provider `retry-after`.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Wait before retry number `attempt + 1` (0-based `attempt`).
    pub fn delay_for(&self, attempt: u32, err: &LlmError) -> Duration {
        let backoff = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(16)));
        let wait = match err.retry_after() {
            Some(requested) => requested.max(backoff),
            None => backoff,
        };
        wait.min(self.max_delay)
    }
}

// ─── RetryingClient ───────────────────────────────────────────────────────

/// Wraps a client so transient failures are retried under a [`RetryPolicy`].
///
/// Only the transport call is retried. JSON decoding happens after the
/// retry loop, so an undecodable reply fails immediately.
#[derive(Debug)]
pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C> RetryingClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl<C: LlmClient> LlmClient for RetryingClient<C> {
    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            match self.inner.complete(request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(attempt, &err);
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient model provider error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
