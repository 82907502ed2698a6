pub mod config;
pub mod error;
pub mod pipeline;
mod reply;
pub mod tools;
pub mod types;

pub use config::{PipelineSettings, SentinelConfig};
pub use error::{Result, SentinelError};
pub use pipeline::{IncidentPipeline, Step};
pub use tools::{StubToolset, Toolset};
pub use types::{AgentResult, EvidenceItem, Incident};
