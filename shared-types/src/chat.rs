use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Recognized intent, flattened for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum IntentKind {
    Greeting,
    Help,
    Template,
    ImportHelp,
    LlmStatus,
    Refresh,
    Projects,
    Team,
    Deadlines,
    Status,
    Summary,
    ProjectSearch,
    MemberLookup,
}

/// How the dashboard should present a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseKind {
    Info,
    Alert,
    Suggestion,
    Analysis,
}

/// Tone of the rendered replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStyle {
    #[default]
    Friendly,
    Plain,
}

impl std::str::FromStr for ResponseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "friendly" | "convivial" => Ok(ResponseStyle::Friendly),
            "plain" | "simple" => Ok(ResponseStyle::Plain),
            _ => Err(format!("Unknown response style: {}", s)),
        }
    }
}

/// Request body for a chat turn
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ChatRequest {
    pub message: String,
}

/// Final answer of one assistant turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct AssistantReply {
    pub text: String,
    pub suggestions: Vec<String>,
    pub kind: ResponseKind,
    /// `None` when nothing matched and the generic fallback was used
    pub intent: Option<IntentKind>,
    pub generated_by_external: bool,
}
