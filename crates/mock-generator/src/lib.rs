//! Mock text generators for testing.
//!
//! - `ScriptedGenerator` - Returns a fixed reply and records every call
//! - `FailingGenerator` - Fails every call with a chosen error
//!
//! For real generation, use the `ollama-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_generator::{ChatMessage, ScriptedGenerator, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let generator = ScriptedGenerator::new("## Day 1");
//!     let reply = generator.generate(&[ChatMessage::user("plan")]).await.unwrap();
//!     assert_eq!(reply, "## Day 1");
//!     assert_eq!(generator.call_count().await, 1);
//! }
//! ```

mod failing;
mod scripted;

// Re-export planner-core types for convenience
pub use planner_core::{async_trait, ChatMessage, GenerationError, TextGenerator};

pub use failing::FailingGenerator;
pub use scripted::ScriptedGenerator;
