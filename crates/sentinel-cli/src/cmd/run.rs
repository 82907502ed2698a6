use std::path::Path;

use anyhow::{Context, Result};
use sentinel_core::{Incident, IncidentPipeline, SentinelConfig};
use sentinel_server::routes::incidents::RunIncidentResponse;
use serde_json::Value;

use crate::output::print_json;

pub fn run(config: SentinelConfig, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read incident file {}", path.display()))?;
    let incident = parse_incident(&raw)
        .with_context(|| format!("invalid incident in {}", path.display()))?;

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        let pipeline = IncidentPipeline::from_config(&config)?;
        pipeline.run(&incident).await
    })?;

    print_json(&RunIncidentResponse {
        result,
        traces: Vec::new(),
    })
}

/// Accepts the bare incident or the `/run_incident` request body.
fn parse_incident(raw: &str) -> Result<Incident> {
    let mut value: Value = serde_json::from_str(raw)?;
    let incident = match value.get_mut("incident") {
        Some(inner) if inner.is_object() => inner.take(),
        _ => value,
    };
    Ok(serde_json::from_value(incident)?)
}
