//! Configuration for OllamaBrain.

use planner_core::GenerationError;
use std::env;

/// Default Ollama host.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-oss:20b";

/// Configuration for OllamaBrain.
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub host: String,

    /// Model name to use.
    pub model: String,

    /// Sampling temperature, left to the server default when unset.
    pub temperature: Option<f32>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
        }
    }
}

impl OllamaConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `OLLAMA_HOST` - Server URL (default: http://localhost:11434)
    /// - `OLLAMA_MODEL` - Model name (default: gpt-oss:20b)
    /// - `OLLAMA_TEMPERATURE` - Temperature (default: server default)
    pub fn from_env() -> Result<Self, GenerationError> {
        let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = match env::var("OLLAMA_TEMPERATURE") {
            Ok(value) => Some(value.parse::<f32>().map_err(|_| {
                GenerationError::Configuration(format!(
                    "OLLAMA_TEMPERATURE is not a number: {}",
                    value
                ))
            })?),
            Err(_) => None,
        };

        let config = Self {
            host,
            model,
            temperature,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> OllamaConfigBuilder {
        OllamaConfigBuilder::default()
    }

    /// Check that the host is an http(s) URL and the model is set.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(GenerationError::Configuration(format!(
                "OLLAMA_HOST must start with http:// or https://, got {}",
                self.host
            )));
        }
        if self.model.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "OLLAMA_MODEL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.host.trim_end_matches('/'))
    }
}

/// Builder for OllamaConfig.
#[derive(Debug, Default)]
pub struct OllamaConfigBuilder {
    config: OllamaConfig,
}

impl OllamaConfigBuilder {
    /// Set the server URL.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OllamaConfig {
        self.config
    }
}
