//! Capabilities the pipeline can call out to.
//!
//! [`StubToolset`] is the only implementation shipped here: every operation
//! returns fixed placeholder data and touches nothing. Real retrieval, graph,
//! git and GitHub adapters plug in behind the same [`Toolset`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::types::EvidenceItem;

/// Longest excerpt, in characters, the stub retriever hands back.
pub const STUB_EXCERPT_CHARS: usize = 400;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} unavailable: {reason}")]
    Unavailable { tool: &'static str, reason: String },

    #[error("{tool} rejected request: {reason}")]
    Rejected { tool: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchReceipt {
    pub ok: bool,
    pub message: String,
    pub repo_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub ok: bool,
    pub url: String,
}

#[async_trait]
pub trait Toolset: Send + Sync {
    /// Ranked evidence candidates for a free-text query.
    async fn retrieve(&self, query: &str) -> Result<Vec<EvidenceItem>, ToolError>;

    async fn graph_query(&self, query: &str, params: Value) -> Result<Value, ToolError>;

    async fn apply_patch(&self, repo_path: &str, patch: &str) -> Result<PatchReceipt, ToolError>;

    async fn open_pull_request(
        &self,
        repo: &str,
        title: &str,
        body: &str,
        branch: &str,
    ) -> Result<PullRequest, ToolError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StubToolset;

#[async_trait]
impl Toolset for StubToolset {
    async fn retrieve(&self, query: &str) -> Result<Vec<EvidenceItem>, ToolError> {
        let excerpt: String = query.chars().take(STUB_EXCERPT_CHARS).collect();
        Ok(vec![EvidenceItem::doc("doc-stub", excerpt)])
    }

    async fn graph_query(&self, query: &str, params: Value) -> Result<Value, ToolError> {
        let params = if params.is_null() { json!({}) } else { params };
        Ok(json!({ "ok": true, "query": query, "params": params }))
    }

    async fn apply_patch(&self, repo_path: &str, _patch: &str) -> Result<PatchReceipt, ToolError> {
        Ok(PatchReceipt {
            ok: true,
            message: "patch applied (stub)".into(),
            repo_path: repo_path.to_string(),
        })
    }

    async fn open_pull_request(
        &self,
        repo: &str,
        _title: &str,
        _body: &str,
        _branch: &str,
    ) -> Result<PullRequest, ToolError> {
        Ok(PullRequest {
            ok: true,
            url: format!("https://github.com/{repo}/pulls/stub"),
        })
    }
}
