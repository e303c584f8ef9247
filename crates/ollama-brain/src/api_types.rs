//! Ollama `/api/chat` request and response types.

use planner_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Chat request sent to Ollama.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Model to use
    pub model: &'a str,
    /// Messages in the conversation
    pub messages: &'a [ChatMessage],
    /// Always false: the full reply is returned in one body
    pub stream: bool,
    /// Sampling options (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

/// Model options.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Non-streaming chat response.
///
/// Every field is optional; a missing message or content reads as empty text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
    /// The reply
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    /// Whether generation finished
    #[serde(default)]
    pub done: Option<bool>,
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    /// Tokens generated
    #[serde(default)]
    pub eval_count: Option<u64>,
}

impl ChatResponse {
    /// Text of the reply, empty when absent.
    pub fn content(&self) -> String {
        self.message
            .as_ref()
            .and_then(|m| m.content.clone())
            .unwrap_or_default()
    }
}

/// Reply message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned by Ollama.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
}
