//! Project assistant for the SydoFlow dashboard.
//!
//! Classifies a free-text utterance, answers it from the loaded projects and
//! team tables, and optionally appends text from a local Ollama server.

pub mod config;
pub mod gateway;
pub mod intent;
pub mod metrics;
pub mod ollama;
pub mod orchestrator;
pub mod render;
pub mod store;
pub mod system_prompt;

pub use config::AssistantConfig;
pub use gateway::{AugmentationGateway, GenerationError, GenerationResult, SamplingOptions, TextGenerator};
pub use intent::{Command, Intent, IntentClassifier, Query};
pub use metrics::{MetricsCalculator, SnapshotCache, Thresholds};
pub use ollama::{OllamaClient, OllamaSettings};
pub use orchestrator::Assistant;
pub use render::{RenderedReply, ResponseRenderer, APOLOGY};
pub use store::{
    Clock, DataSource, DataSources, FixedClock, RecordStore, Records, StoreView, SystemClock,
};
