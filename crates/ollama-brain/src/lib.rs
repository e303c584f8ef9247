//! Ollama-backed text generator.
//!
//! This crate provides a [`TextGenerator`] that sends a whole conversation
//! to an Ollama-compatible `/api/chat` endpoint in a single non-streaming
//! request and returns the reply text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use ollama_brain::{ChatMessage, OllamaBrain, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = OllamaBrain::from_env()?;
//!     let reply = brain
//!         .generate(&[ChatMessage::user("Plan one day in Hue")])
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OllamaBrain;
pub use config::{OllamaConfig, OllamaConfigBuilder};

// Re-export planner-core types for convenience
pub use planner_core::{async_trait, ChatMessage, GenerationError, Role, TextGenerator};
