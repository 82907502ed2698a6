use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use sentinel_core::{AgentResult, Incident, IncidentPipeline};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::{error::AppError, notify, state::AppState};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize)]
pub struct RunIncidentRequest {
    pub incident: Incident,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RunIncidentResponse {
    pub result: AgentResult,
    /// Reserved for per-step execution traces; always empty.
    pub traces: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /run_incident — diagnose one incident and propose a fix.
///
/// Builds a fresh pipeline per request, runs retrieve → diagnose → plan to
/// completion and returns the merged result. Any step failure fails the
/// whole request with no partial result.
pub async fn run_incident(
    State(app): State<AppState>,
    payload: Result<Json<RunIncidentRequest>, JsonRejection>,
) -> Result<Json<RunIncidentResponse>, AppError> {
    let Json(RunIncidentRequest { incident }) = payload.map_err(AppError::from_rejection)?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "run_incident",
        %run_id,
        api = %incident.api,
        endpoint = %incident.endpoint
    );

    let result = execute(&app, &incident).instrument(span.clone()).await?;

    if let Some(webhook_url) = app.config.slack_webhook_url.clone() {
        let http = app.http.clone();
        let alert_result = result.clone();
        tokio::spawn(
            async move {
                if let Err(e) =
                    notify::send_slack_alert(&http, &webhook_url, &incident, &alert_result).await
                {
                    tracing::warn!(error = %format!("{e:#}"), "slack alert failed");
                }
            }
            .instrument(span),
        );
    }

    Ok(Json(RunIncidentResponse {
        result,
        traces: Vec::new(),
    }))
}

async fn execute(app: &AppState, incident: &Incident) -> sentinel_core::Result<AgentResult> {
    let pipeline = IncidentPipeline::from_config(&app.config)?;
    pipeline.run(incident).await
}
