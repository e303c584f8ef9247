//! Core types and traits shared by the travel planner crates.
//!
//! This crate defines:
//!
//! - [`TextGenerator`] - The trait every text generation backend implements
//! - [`ChatMessage`] / [`Role`] - Conversation turns sent to a generator
//! - [`TripRequest`] - Trip parameters entered by the user
//! - [`GenerationError`] - Error type for generation calls
//! - [`RecentMessages`] - Bounded buffer of the latest conversation turns
//!
//! # Example
//!
//! ```rust
//! use planner_core::{async_trait, ChatMessage, GenerationError, TextGenerator};
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl TextGenerator for Fixed {
//!     async fn generate(&self, _conversation: &[ChatMessage]) -> Result<String, GenerationError> {
//!         Ok("## Day 1".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Fixed"
//!     }
//! }
//! ```

mod error;
mod generator;
mod message;
mod prompt;
mod recent;
mod trip;

pub use error::GenerationError;
pub use generator::TextGenerator;
pub use message::{ChatMessage, Role, UnknownRole};
pub use prompt::{hash_prompt, itinerary_conversation, system_prompt, user_prompt};
pub use recent::{RecentMessages, DEFAULT_RECENT_CAPACITY};
pub use trip::{Interest, Pace, TripLength, TripRequest, UnknownInterest, UnknownPace};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
