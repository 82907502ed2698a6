use serde::{Deserialize, Serialize};

/// Confidence used when neither model step supplies a usable value.
pub const DEFAULT_CONFIDENCE: f64 = 0.6;

// ---------------------------------------------------------------------------
// Incident
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// An observed API failure, as reported by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// API name.
    pub api: String,
    /// Endpoint path, e.g. `/v1/users`.
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// ISO-8601 timestamp; carried through verbatim.
    pub timestamp: String,
    /// Raw log text.
    pub logs: String,
    pub status_code: u16,
    /// Latency in milliseconds.
    pub latency: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

// ---------------------------------------------------------------------------
// Evidence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Doc,
    Incident,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub id: String,
    pub excerpt: String,
    /// Character offset of the excerpt within its source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage_start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage_end: Option<u64>,
    /// Start and end line in the incident logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_line_numbers: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl EvidenceItem {
    pub fn doc(id: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            kind: EvidenceKind::Doc,
            id: id.into(),
            excerpt: excerpt.into(),
            passage_start: None,
            passage_end: None,
            log_line_numbers: None,
            score: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnosis / PatchPlan
// ---------------------------------------------------------------------------

/// Output of the diagnose step.
///
/// `evidence` is always the retrieved set, never what the model cited. The
/// fix fields are whatever the model volunteered and only serve as
/// fallbacks for the plan step.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub root_cause: Option<String>,
    pub confidence: Option<f64>,
    pub evidence: Vec<EvidenceItem>,
    pub suggested_fix: Option<String>,
    pub patch_snippet: Option<String>,
    pub next_steps: Option<Vec<String>>,
}

/// Output of the plan-fix step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchPlan {
    pub suggested_fix: Option<String>,
    pub patch_snippet: Option<String>,
    pub next_steps: Option<Vec<String>>,
    pub root_cause: Option<String>,
    pub confidence: Option<f64>,
}

// ---------------------------------------------------------------------------
// AgentResult
// ---------------------------------------------------------------------------

/// The normalized diagnosis returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub root_cause: String,
    pub confidence: f64,
    pub suggested_fix: String,
    pub patch_snippet: Option<String>,
    pub evidence: Vec<EvidenceItem>,
    pub next_steps: Vec<String>,
    pub human_review_required: bool,
}

impl AgentResult {
    /// Merge the two step outputs. Plan fields win for the fix, diagnosis
    /// fields win for root cause and confidence.
    pub fn merge(diagnosis: Diagnosis, plan: PatchPlan, confidence_threshold: f64) -> Self {
        let confidence = diagnosis
            .confidence
            .or(plan.confidence)
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0.0, 1.0);

        Self {
            root_cause: diagnosis
                .root_cause
                .or(plan.root_cause)
                .unwrap_or_default(),
            confidence,
            suggested_fix: plan
                .suggested_fix
                .or(diagnosis.suggested_fix)
                .unwrap_or_default(),
            patch_snippet: plan.patch_snippet.or(diagnosis.patch_snippet),
            evidence: diagnosis.evidence,
            next_steps: plan
                .next_steps
                .or(diagnosis.next_steps)
                .unwrap_or_default(),
            human_review_required: confidence < confidence_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_diagnosis() -> Diagnosis {
        Diagnosis {
            root_cause: None,
            confidence: None,
            evidence: vec![],
            suggested_fix: None,
            patch_snippet: None,
            next_steps: None,
        }
    }

    #[test]
    fn incident_accepts_minimal_payload() {
        let json = r#"{
            "api": "billing",
            "endpoint": "/v1/invoices",
            "timestamp": "2024-05-01T12:00:00Z",
            "logs": "ERROR upstream timeout",
            "status_code": 504,
            "latency": 30000
        }"#;
        let incident: Incident = serde_json::from_str(json).unwrap();
        assert_eq!(incident.method, None);
        assert_eq!(incident.severity, None);
        assert_eq!(incident.status_code, 504);
    }

    #[test]
    fn incident_rejects_unknown_severity() {
        let json = r#"{
            "api": "billing", "endpoint": "/", "timestamp": "t", "logs": "",
            "status_code": 500, "latency": 1, "severity": "apocalyptic"
        }"#;
        assert!(serde_json::from_str::<Incident>(json).is_err());
    }

    #[test]
    fn evidence_serializes_type_tag_and_skips_empty_markers() {
        let item = EvidenceItem::doc("doc-1", "pool size is 10");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "doc");
        assert_eq!(json["id"], "doc-1");
        assert!(json.get("passage_start").is_none());
        assert!(json.get("score").is_none());
    }

    #[test]
    fn merge_defaults_everything() {
        let result = AgentResult::merge(empty_diagnosis(), PatchPlan::default(), 0.6);
        assert_eq!(result.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(result.root_cause, "");
        assert_eq!(result.suggested_fix, "");
        assert_eq!(result.patch_snippet, None);
        assert!(result.next_steps.is_empty());
        assert!(!result.human_review_required);
    }

    #[test]
    fn merge_prefers_plan_fix_and_diagnosis_confidence() {
        let diagnosis = Diagnosis {
            root_cause: Some("connection pool exhausted".into()),
            confidence: Some(0.9),
            suggested_fix: Some("restart".into()),
            next_steps: Some(vec!["page on-call".into()]),
            ..empty_diagnosis()
        };
        let plan = PatchPlan {
            suggested_fix: Some("raise max_connections".into()),
            next_steps: Some(vec!["deploy".into(), "monitor".into()]),
            confidence: Some(0.1),
            ..Default::default()
        };
        let result = AgentResult::merge(diagnosis, plan, 0.6);
        assert_eq!(result.suggested_fix, "raise max_connections");
        assert_eq!(result.next_steps, vec!["deploy", "monitor"]);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.root_cause, "connection pool exhausted");
    }

    #[test]
    fn merge_falls_back_to_plan_confidence() {
        let plan = PatchPlan {
            confidence: Some(0.3),
            ..Default::default()
        };
        let result = AgentResult::merge(empty_diagnosis(), plan, 0.6);
        assert_eq!(result.confidence, 0.3);
        assert!(result.human_review_required);
    }

    #[test]
    fn merge_clamps_out_of_range_confidence() {
        let high = Diagnosis {
            confidence: Some(7.5),
            ..empty_diagnosis()
        };
        assert_eq!(AgentResult::merge(high, PatchPlan::default(), 0.6).confidence, 1.0);

        let low = Diagnosis {
            confidence: Some(-0.2),
            ..empty_diagnosis()
        };
        let result = AgentResult::merge(low, PatchPlan::default(), 0.6);
        assert_eq!(result.confidence, 0.0);
        assert!(result.human_review_required);
    }

    #[test]
    fn threshold_boundary_does_not_require_review() {
        let at = Diagnosis {
            confidence: Some(0.75),
            ..empty_diagnosis()
        };
        assert!(!AgentResult::merge(at, PatchPlan::default(), 0.75).human_review_required);

        let below = Diagnosis {
            confidence: Some(0.7499),
            ..empty_diagnosis()
        };
        assert!(AgentResult::merge(below, PatchPlan::default(), 0.75).human_review_required);
    }

    #[test]
    fn result_serializes_null_patch_snippet() {
        let result = AgentResult::merge(empty_diagnosis(), PatchPlan::default(), 0.6);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["patch_snippet"].is_null());
        assert_eq!(json["human_review_required"], false);
    }
}
