//! Scripted generator - returns a fixed reply.

use planner_core::{async_trait, ChatMessage, GenerationError, TextGenerator};
use tokio::sync::Mutex;

/// A generator that always answers with the same text.
///
/// Every conversation it receives is kept so tests can inspect what the
/// caller sent.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    reply: String,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    /// Create a generator answering with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Conversations received so far, oldest first.
    pub async fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().await.clone()
    }

    /// Number of generate calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, conversation: &[ChatMessage]) -> Result<String, GenerationError> {
        if conversation.is_empty() {
            return Err(GenerationError::EmptyConversation);
        }
        self.calls.lock().await.push(conversation.to_vec());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "ScriptedGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls() {
        let generator = ScriptedGenerator::new("reply");

        generator
            .generate(&[ChatMessage::system("s"), ChatMessage::user("u")])
            .await
            .unwrap();
        generator.generate(&[ChatMessage::user("again")]).await.unwrap();

        let calls = generator.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[1][0].content, "again");
    }

    #[tokio::test]
    async fn test_empty_conversation() {
        let generator = ScriptedGenerator::new("reply");
        let result = generator.generate(&[]).await;

        assert!(matches!(result, Err(GenerationError::EmptyConversation)));
        assert_eq!(generator.call_count().await, 0);
    }
}
