use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Availability of the text-generation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum LlmAvailability {
    #[default]
    Unknown,
    Checking,
    Available,
    Unavailable,
}

/// LLM state as shown by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct LlmStatus {
    pub availability: LlmAvailability,
    pub enabled: bool,
    pub model: String,
    pub temperature: f32,
}

impl LlmStatus {
    pub fn is_active(&self) -> bool {
        self.enabled && self.availability == LlmAvailability::Available
    }
}

/// Models installed on the generation server
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Request naming a model to select or pull
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ModelRequest {
    pub model: String,
}
