//! Slack alert for completed runs.

use anyhow::Context;
use sentinel_core::{AgentResult, Incident};

/// Plain-text alert body: which endpoint failed and what the agent thinks.
pub fn alert_text(incident: &Incident, result: &AgentResult) -> String {
    let endpoint = match incident.method.as_deref() {
        Some(method) => format!("{method} {}", incident.endpoint),
        None => incident.endpoint.clone(),
    };
    let mut text = format!(
        "API Sentinel Alert\n\
         Incident: {} {endpoint}\n\
         Status: {}, Latency: {}ms\n\
         Root cause: {}\n\
         Confidence: {:.2}",
        incident.api, incident.status_code, incident.latency, result.root_cause, result.confidence,
    );
    if result.human_review_required {
        text.push_str("\nHuman review required");
    }
    text
}

/// Post the alert to a Slack incoming webhook.
pub async fn send_slack_alert(
    http: &reqwest::Client,
    webhook_url: &str,
    incident: &Incident,
    result: &AgentResult,
) -> anyhow::Result<()> {
    let body = serde_json::json!({ "text": alert_text(incident, result) });
    http.post(webhook_url)
        .json(&body)
        .send()
        .await
        .context("failed to reach Slack webhook")?
        .error_for_status()
        .context("Slack webhook rejected alert")?;
    Ok(())
}
