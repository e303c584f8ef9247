//! OllamaBrain implementation.

use planner_core::{async_trait, ChatMessage, GenerationError, TextGenerator};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatOptions, ChatRequest, ChatResponse};
use crate::config::OllamaConfig;

/// A text generator backed by an Ollama chat endpoint.
///
/// Each call is a single blocking request: no retries and no client-side
/// timeout.
pub struct OllamaBrain {
    client: Client,
    config: OllamaConfig,
}

impl OllamaBrain {
    /// Create a new OllamaBrain with the given configuration.
    pub fn new(config: OllamaConfig) -> Result<Self, GenerationError> {
        config.validate()?;

        let client = Client::builder().build().map_err(|e| {
            GenerationError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "OllamaBrain initialized with model: {}, host: {}",
            config.model, config.host
        );

        Ok(Self { client, config })
    }

    /// Create an OllamaBrain from environment variables.
    ///
    /// See [`OllamaConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::new(OllamaConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Send one chat request.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, GenerationError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
            options: self.config.temperature.map(|temperature| ChatOptions {
                temperature: Some(temperature),
            }),
        };

        debug!(
            "Sending {} messages to {}",
            messages.len(),
            self.config.chat_url()
        );

        let response = self
            .client
            .post(self.config.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error,
                Err(_) => error_text,
            };

            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        Ok(completion)
    }
}

#[async_trait]
impl TextGenerator for OllamaBrain {
    async fn generate(&self, conversation: &[ChatMessage]) -> Result<String, GenerationError> {
        if conversation.is_empty() {
            return Err(GenerationError::EmptyConversation);
        }

        let completion = self.chat(conversation).await?;

        if let (Some(prompt), Some(eval)) = (completion.prompt_eval_count, completion.eval_count) {
            debug!("Token usage - prompt: {}, completion: {}", prompt, eval);
        }

        Ok(completion.content())
    }

    fn name(&self) -> &str {
        "OllamaBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brain_name() {
        let brain = OllamaBrain::new(OllamaConfig::default()).unwrap();
        assert_eq!(brain.name(), "OllamaBrain");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = OllamaConfig::builder().host("localhost").build();
        assert!(OllamaBrain::new(config).is_err());
    }

    #[tokio::test]
    async fn test_empty_conversation_rejected() {
        let brain = OllamaBrain::new(OllamaConfig::default()).unwrap();
        let result = brain.generate(&[]).await;
        assert!(matches!(result, Err(GenerationError::EmptyConversation)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server
        let config = OllamaConfig::builder().host("http://127.0.0.1:9").build();
        let brain = OllamaBrain::new(config).unwrap();

        let err = brain
            .generate(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
        assert!(err.inline().starts_with("[LLM error]"));
    }
}
