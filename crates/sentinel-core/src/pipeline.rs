//! The incident diagnosis pipeline: retrieve → diagnose → plan fix → merge.
//!
//! Steps run strictly in sequence. Each model step is one remote call with
//! no caching; a failed step fails the whole run and nothing partial is
//! returned.

use std::fmt;
use std::sync::Arc;

use sentinel_llm::{CompletionRequest, LlmClient};
use serde_json::json;

use crate::config::{PipelineSettings, SentinelConfig};
use crate::error::{Result, SentinelError};
use crate::reply::ModelReply;
use crate::tools::{StubToolset, Toolset};
use crate::types::{AgentResult, Diagnosis, EvidenceItem, Incident, PatchPlan};

/// Log characters included in the retrieval query.
pub const SUMMARY_LOG_CHARS: usize = 800;

const DIAGNOSE_SYSTEM_PROMPT: &str = "You are API Sentinel Agent. Diagnose the incident using \
only the provided logs and evidence. Do not hallucinate; if unsure, lower your confidence. \
Respond with strict JSON only, no prose, with keys: root_cause (string) and confidence \
(number between 0.0 and 1.0). You may also include suggested_fix, patch_snippet and next_steps.";

const PLAN_SYSTEM_PROMPT: &str = "Produce a patch plan for the diagnosed incident. Respond with \
strict JSON only, no prose, with keys: suggested_fix (string), patch_snippet (string or null) \
and next_steps (array of strings).";

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Retrieve,
    Diagnose,
    PlanFix,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Retrieve => "retrieve",
            Step::Diagnose => "diagnose",
            Step::PlanFix => "plan-fix",
        })
    }
}

// ---------------------------------------------------------------------------
// IncidentPipeline
// ---------------------------------------------------------------------------

pub struct IncidentPipeline {
    llm: Arc<dyn LlmClient>,
    tools: Arc<dyn Toolset>,
    settings: PipelineSettings,
}

impl IncidentPipeline {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Arc<dyn Toolset>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            llm,
            tools,
            settings,
        }
    }

    /// Build a pipeline against the configured provider and the stub tools.
    ///
    /// Fails before any network traffic when the provider credential is
    /// missing.
    pub fn from_config(config: &SentinelConfig) -> Result<Self> {
        config.validate()?;
        let llm = sentinel_llm::connect(&config.llm)?;
        Ok(Self::new(llm, Arc::new(StubToolset), config.pipeline))
    }

    pub async fn run(&self, incident: &Incident) -> Result<AgentResult> {
        let evidence = self.retrieve(incident).await?;
        let (diagnosis, diagnosis_reply) = self.diagnose(incident, evidence).await?;
        let plan = self.plan_fix(&diagnosis_reply).await?;

        let result = AgentResult::merge(diagnosis, plan, self.settings.confidence_threshold);
        tracing::info!(
            api = %incident.api,
            endpoint = %incident.endpoint,
            confidence = result.confidence,
            human_review_required = result.human_review_required,
            evidence = result.evidence.len(),
            "incident diagnosed"
        );
        Ok(result)
    }

    async fn retrieve(&self, incident: &Incident) -> Result<Vec<EvidenceItem>> {
        let query = incident_summary(incident);
        let mut evidence = self.tools.retrieve(&query).await?;
        evidence.truncate(self.settings.max_evidence);
        tracing::debug!(step = %Step::Retrieve, items = evidence.len(), "evidence retrieved");
        Ok(evidence)
    }

    async fn diagnose(
        &self,
        incident: &Incident,
        evidence: Vec<EvidenceItem>,
    ) -> Result<(Diagnosis, ModelReply)> {
        let prompt = json!({ "incident": incident, "evidence": evidence }).to_string();
        let reply = self.call(Step::Diagnose, DIAGNOSE_SYSTEM_PROMPT, prompt).await?;

        if reply.contains("evidence") {
            tracing::debug!(
                step = %Step::Diagnose,
                "discarding model-cited evidence in favour of retrieved items"
            );
        }

        let diagnosis = Diagnosis {
            root_cause: reply.expect_text("root_cause"),
            confidence: reply.expect_confidence(),
            evidence,
            suggested_fix: reply.text("suggested_fix"),
            patch_snippet: reply.text("patch_snippet"),
            next_steps: reply.string_list("next_steps"),
        };
        Ok((diagnosis, reply))
    }

    async fn plan_fix(&self, diagnosis: &ModelReply) -> Result<PatchPlan> {
        let prompt = diagnosis.as_value().to_string();
        let reply = self.call(Step::PlanFix, PLAN_SYSTEM_PROMPT, prompt).await?;

        Ok(PatchPlan {
            suggested_fix: reply.expect_text("suggested_fix"),
            patch_snippet: reply.text("patch_snippet"),
            next_steps: reply.expect_string_list("next_steps"),
            root_cause: reply.text("root_cause"),
            confidence: reply.confidence(),
        })
    }

    async fn call(&self, step: Step, system: &str, prompt: String) -> Result<ModelReply> {
        let request = CompletionRequest {
            system: system.to_string(),
            prompt,
            max_tokens: self.settings.max_tokens,
        };
        tracing::debug!(step = %step, model = self.llm.model(), "calling model");
        let value = self
            .llm
            .complete_json(&request)
            .await
            .map_err(|source| SentinelError::Step { step, source })?;
        ModelReply::from_value(step, value)
    }
}

/// One-line retrieval query: method, endpoint, status, latency and the
/// head of the logs.
pub fn incident_summary(incident: &Incident) -> String {
    let logs: String = incident.logs.chars().take(SUMMARY_LOG_CHARS).collect();
    let method = incident.method.as_deref().unwrap_or("");
    format!(
        "{method} {} status={} latency={} logs={logs}",
        incident.endpoint, incident.status_code, incident.latency
    )
    .trim_start()
    .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
