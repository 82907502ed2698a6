use std::sync::Arc;

use sentinel_core::SentinelConfig;

/// Shared application state passed to all route handlers.
///
/// Read-only: each `/run_incident` request builds its own pipeline from
/// `config`, so nothing mutable crosses requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SentinelConfig>,
    /// Outbound client for alert webhooks.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: SentinelConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_keeps_config() {
        let mut config = SentinelConfig::default();
        config.slack_webhook_url = Some("https://hooks.slack.test/T000".into());
        let state = AppState::new(config);
        assert_eq!(
            state.config.slack_webhook_url.as_deref(),
            Some("https://hooks.slack.test/T000")
        );
    }
}
