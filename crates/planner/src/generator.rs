//! Itinerary generation.

use std::sync::Arc;

use planner_core::{
    hash_prompt, itinerary_conversation, GenerationError, Role, TextGenerator, TripRequest,
};
use tracing::{debug, info, warn};

use crate::store::{ConversationStore, ItineraryStore};

/// Result of one itinerary request.
///
/// Generation failures and save failures are reported separately; neither
/// is raised to the caller.
#[derive(Debug)]
pub struct ItineraryOutcome {
    /// Generated Markdown, or why generation failed.
    pub generation: Result<String, GenerationError>,
    /// Id of the stored record when the save succeeded.
    pub saved_id: Option<i64>,
    /// Why the save failed, when it did.
    pub save_error: Option<String>,
}

impl ItineraryOutcome {
    /// Whether text was generated.
    pub fn is_generated(&self) -> bool {
        self.generation.is_ok()
    }

    /// Text to show the user.
    ///
    /// A generation failure renders as `[LLM error] ...`; a failed save
    /// appends a warning line after the itinerary.
    pub fn display_text(&self) -> String {
        let mut text = match &self.generation {
            Ok(text) => text.clone(),
            Err(err) => err.inline(),
        };

        if let Some(error) = &self.save_error {
            text.push_str(&format!(
                "\n\n[Warning: failed to save itinerary: {}]",
                error
            ));
        }

        text
    }
}

/// Builds prompts, calls the text generator once, and stores the result.
pub struct ItineraryGenerator {
    generator: Arc<dyn TextGenerator>,
    itineraries: Arc<dyn ItineraryStore>,
    conversations: Option<Arc<dyn ConversationStore>>,
}

impl ItineraryGenerator {
    /// Create a generator writing to the given itinerary store.
    pub fn new(generator: Arc<dyn TextGenerator>, itineraries: Arc<dyn ItineraryStore>) -> Self {
        Self {
            generator,
            itineraries,
            conversations: None,
        }
    }

    /// Also record each request and reply in the user's conversation log.
    ///
    /// The log is written after the itinerary save; failures there are
    /// logged and otherwise ignored.
    pub fn with_conversation_log(mut self, conversations: Arc<dyn ConversationStore>) -> Self {
        self.conversations = Some(conversations);
        self
    }

    /// Name of the underlying text generator.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Generate an itinerary for `user_id` and store it.
    ///
    /// Only the system and user instructions built from `request` are sent;
    /// earlier conversation turns are not included.
    pub async fn generate_itinerary(&self, request: &TripRequest, user_id: &str) -> ItineraryOutcome {
        let conversation = itinerary_conversation(request);

        info!(
            user_id,
            origin = %request.origin,
            destination = %request.destination,
            days = %request.length(),
            pace = %request.pace,
            "Generating itinerary"
        );
        debug!(
            "System prompt fingerprint: {}",
            hash_prompt(&conversation[0].content)
        );

        let text = match self.generator.generate(&conversation).await {
            Ok(text) => text,
            Err(err) => {
                warn!(user_id, error = %err, "Itinerary generation failed");
                return ItineraryOutcome {
                    generation: Err(err),
                    saved_id: None,
                    save_error: None,
                };
            }
        };

        let (saved_id, save_error) = match self.itineraries.save_itinerary(user_id, &text).await {
            Ok(id) => {
                debug!(user_id, id, "Itinerary saved");
                (Some(id), None)
            }
            Err(err) => {
                warn!(user_id, error = %err, "Failed to save itinerary");
                (None, Some(err.to_string()))
            }
        };

        if let Some(conversations) = &self.conversations {
            let user_text = &conversation[1].content;
            for (role, content) in [(Role::User, user_text.as_str()), (Role::Assistant, text.as_str())] {
                if let Err(err) = conversations.save_message(user_id, role, content).await {
                    warn!(user_id, error = %err, "Failed to record conversation turn");
                    break;
                }
            }
        }

        ItineraryOutcome {
            generation: Ok(text),
            saved_id,
            save_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_success() {
        let outcome = ItineraryOutcome {
            generation: Ok("## Day 1".to_string()),
            saved_id: Some(1),
            save_error: None,
        };
        assert!(outcome.is_generated());
        assert_eq!(outcome.display_text(), "## Day 1");
    }

    #[test]
    fn test_display_save_warning() {
        let outcome = ItineraryOutcome {
            generation: Ok("## Day 1".to_string()),
            saved_id: None,
            save_error: Some("disk full".to_string()),
        };
        assert_eq!(
            outcome.display_text(),
            "## Day 1\n\n[Warning: failed to save itinerary: disk full]"
        );
    }

    #[test]
    fn test_display_generation_error() {
        let outcome = ItineraryOutcome {
            generation: Err(GenerationError::Network("timed out".to_string())),
            saved_id: None,
            save_error: None,
        };
        assert!(!outcome.is_generated());
        assert_eq!(outcome.display_text(), "[LLM error] network error: timed out");
    }
}
