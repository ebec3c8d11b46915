use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod analysis;
pub mod chat;
pub mod dataset;
pub mod llm;
pub mod project;
pub mod team;

pub use analysis::{DerivedSnapshot, ScheduledProject, StatusCount};
pub use chat::{AssistantReply, ChatRequest, IntentKind, ResponseKind, ResponseStyle};
pub use dataset::{DatasetKind, ImportCsvRequest, LoadError, LoadSummary};
pub use llm::{LlmAvailability, LlmStatus, ModelRequest, ModelsResponse};
pub use project::{Priority, Project, ProjectsResponse};
pub use team::{Availability, TeamMember, TeamResponse};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
}
