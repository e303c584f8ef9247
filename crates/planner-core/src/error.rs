//! Error types for text generation.

use thiserror::Error;

/// Prefix used when a generation failure is shown in place of generated text.
pub const INLINE_ERROR_PREFIX: &str = "[LLM error]";

/// Errors that can occur while generating text.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No messages were supplied.
    #[error("conversation is empty")]
    EmptyConversation,

    /// The endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The backend is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Render the error the way it is displayed in place of an itinerary.
    pub fn inline(&self) -> String {
        format!("{} {}", INLINE_ERROR_PREFIX, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_prefix() {
        let err = GenerationError::Network("connection refused".to_string());
        assert_eq!(err.inline(), "[LLM error] network error: connection refused");
    }

    #[test]
    fn test_api_error_display() {
        let err = GenerationError::Api {
            status: 404,
            message: "model not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): model not found");
        assert!(err.inline().starts_with(INLINE_ERROR_PREFIX));
    }
}
