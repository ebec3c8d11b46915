use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::gateway::{GenerationError, SamplingOptions, TextGenerator};

const PULL_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub base_url: String,
    pub probe_timeout: Duration,
    pub timeout: Duration,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            probe_timeout: Duration::from_secs(3),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

/// Client for a local Ollama server
pub struct OllamaClient {
    http: reqwest::Client,
    settings: OllamaSettings,
}

impl OllamaClient {
    pub fn new(settings: OllamaSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, GenerationError> {
        let response = request
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status().as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let response = self
            .send(
                self.http
                    .get(self.url("/api/tags"))
                    .timeout(self.settings.probe_timeout),
            )
            .await?;

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Payload(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        tracing::debug!("Generating with {} ({} prompt chars)", model, prompt.len());
        let response = self
            .send(
                self.http
                    .post(self.url("/api/generate"))
                    .timeout(self.settings.timeout)
                    .json(&body),
            )
            .await?;

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Payload(e.to_string()))?;

        Ok(generated.response)
    }

    async fn pull_model(&self, model: &str) -> Result<(), GenerationError> {
        self.send(
            self.http
                .post(self.url("/api/pull"))
                .timeout(PULL_TIMEOUT)
                .json(&PullRequest {
                    name: model,
                    stream: false,
                }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{AugmentationGateway, GenerationResult};
    use shared_types::LlmAvailability;
    use std::sync::Arc;

    fn unreachable() -> OllamaClient {
        OllamaClient::new(OllamaSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            probe_timeout: Duration::from_secs(1),
            timeout: Duration::from_secs(1),
        })
    }

    #[test]
    fn test_url_joining() {
        let client = OllamaClient::new(OllamaSettings {
            base_url: "http://localhost:11434/".to_string(),
            ..OllamaSettings::default()
        });
        assert_eq!(client.url("/api/tags"), "http://localhost:11434/api/tags");
    }

    #[test]
    fn test_generate_request_shape() {
        let body = GenerateRequest {
            model: "llama3.2:3b",
            prompt: "p",
            stream: false,
            options: GenerateOptions {
                temperature: 0.5,
                num_predict: 1000,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["num_predict"], 1000);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let client = unreachable();
        assert!(matches!(
            client.list_models().await,
            Err(GenerationError::Request(_))
        ));
        assert!(client
            .generate("llama3.2:3b", "p", &SamplingOptions::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_gateway_over_unreachable_endpoint_never_errors() {
        let gateway = AugmentationGateway::new(
            Arc::new(unreachable()),
            "llama3.2:3b",
            SamplingOptions::default(),
            true,
        );
        assert_eq!(gateway.check().await, LlmAvailability::Unavailable);

        let result = gateway
            .augment("deadlines", "local", &serde_json::json!({}))
            .await;
        assert!(matches!(result, GenerationResult::NotGenerated { .. }));
    }
}
