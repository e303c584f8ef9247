//! The TextGenerator trait definition.

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::message::ChatMessage;

/// A backend that turns a conversation into generated text.
///
/// This trait is object-safe and can be used with `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the whole conversation in one request and return the reply text.
    ///
    /// The call completes only once the full reply is available. Failures
    /// come back as [`GenerationError`]; callers that need the inline
    /// `[LLM error]` text use [`GenerationError::inline`].
    async fn generate(&self, conversation: &[ChatMessage]) -> Result<String, GenerationError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;
}
