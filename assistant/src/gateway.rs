use async_trait::async_trait;
use serde_json::Value;
use shared_types::{LlmAvailability, LlmStatus};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::system_prompt;

/// Sampling parameters sent with every generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation server is not available")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Generation server answered with status {0}")]
    Status(u16),

    #[error("Unexpected payload: {0}")]
    Payload(String),
}

/// Text-generation endpoint
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Installed models; also used as the availability probe
    async fn list_models(&self) -> Result<Vec<String>, GenerationError>;

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, GenerationError>;

    async fn pull_model(&self, model: &str) -> Result<(), GenerationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Generated(String),
    NotGenerated { reason: String },
}

struct GatewayState {
    availability: LlmAvailability,
    enabled: bool,
    model: String,
    options: SamplingOptions,
}

/// Optional enrichment of local answers by a text generator.
///
/// Tracks availability (`Unknown -> Checking -> Available | Unavailable`) and
/// only calls out when the last probe succeeded. A failed generation does not
/// change the availability; only `check()` does.
pub struct AugmentationGateway {
    generator: Arc<dyn TextGenerator>,
    state: RwLock<GatewayState>,
}

impl AugmentationGateway {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        model: impl Into<String>,
        options: SamplingOptions,
        enabled: bool,
    ) -> Self {
        Self {
            generator,
            state: RwLock::new(GatewayState {
                availability: LlmAvailability::Unknown,
                enabled,
                model: model.into(),
                options: SamplingOptions {
                    temperature: clamp_temperature(options.temperature),
                    ..options
                },
            }),
        }
    }

    pub async fn status(&self) -> LlmStatus {
        let state = self.state.read().await;
        LlmStatus {
            availability: state.availability,
            enabled: state.enabled,
            model: state.model.clone(),
            temperature: state.options.temperature,
        }
    }

    /// Probe the endpoint and record the outcome
    pub async fn check(&self) -> LlmAvailability {
        self.state.write().await.availability = LlmAvailability::Checking;

        let availability = match self.generator.list_models().await {
            Ok(models) => {
                tracing::info!("Generation server available ({} model(s))", models.len());
                LlmAvailability::Available
            }
            Err(e) => {
                tracing::info!("Generation server unavailable: {}", e);
                LlmAvailability::Unavailable
            }
        };

        self.state.write().await.availability = availability;
        availability
    }

    /// Probe once; later calls reuse the recorded outcome
    pub async fn ensure_checked(&self) -> LlmAvailability {
        let current = self.state.read().await.availability;
        match current {
            LlmAvailability::Unknown => self.check().await,
            other => other,
        }
    }

    /// Flip augmentation on or off. Has no effect while the server is not available.
    pub async fn toggle(&self) -> LlmStatus {
        {
            let mut state = self.state.write().await;
            if state.availability == LlmAvailability::Available {
                state.enabled = !state.enabled;
                tracing::info!("Augmentation enabled: {}", state.enabled);
            }
        }
        self.status().await
    }

    pub async fn set_model(&self, model: impl Into<String>) {
        self.state.write().await.model = model.into();
    }

    /// Clamped to [0, 2]
    pub async fn set_temperature(&self, temperature: f32) {
        self.state.write().await.options.temperature = clamp_temperature(temperature);
    }

    pub async fn models(&self) -> Result<Vec<String>, GenerationError> {
        self.generator.list_models().await
    }

    pub async fn pull_model(&self, model: &str) -> Result<(), GenerationError> {
        self.generator.pull_model(model).await?;
        tracing::info!("Pulled model {}", model);
        Ok(())
    }

    /// One generation call built from the local answer. Never fails: every
    /// problem ends up as `NotGenerated`.
    pub async fn augment(
        &self,
        utterance: &str,
        local_text: &str,
        context_data: &Value,
    ) -> GenerationResult {
        let (availability, model, options) = {
            let state = self.state.read().await;
            (state.availability, state.model.clone(), state.options)
        };

        if availability != LlmAvailability::Available {
            return GenerationResult::NotGenerated {
                reason: GenerationError::Unavailable.to_string(),
            };
        }

        let suggestions: Vec<String> = context_data
            .get("suggestions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let context = system_prompt::context_summary(local_text, &suggestions);
        let prompt = system_prompt::build_prompt(&context, context_data, utterance);

        match self.generator.generate(&model, &prompt, &options).await {
            Ok(text) if !text.trim().is_empty() => GenerationResult::Generated(text.trim().to_string()),
            Ok(_) => GenerationResult::NotGenerated {
                reason: GenerationError::Payload("empty response".to_string()).to_string(),
            },
            Err(e) => {
                tracing::warn!("Augmentation failed, keeping local answer: {}", e);
                GenerationResult::NotGenerated {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return SamplingOptions::default().temperature;
    }
    temperature.clamp(0.0, 2.0)
}
