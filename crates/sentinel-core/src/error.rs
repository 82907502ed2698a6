use sentinel_llm::LlmError;
use thiserror::Error;

use crate::pipeline::Step;
use crate::tools::ToolError;

#[derive(Debug, Error)]
pub enum SentinelError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure opening the model client (e.g. missing credential).
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("{step} step failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: LlmError,
    },

    #[error("{step} step returned {found}, expected a JSON object")]
    UnexpectedShape { step: Step, found: &'static str },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl SentinelError {
    /// The underlying model error, whether it came from setup or a step.
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            SentinelError::Llm(e) | SentinelError::Step { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SentinelError>;
