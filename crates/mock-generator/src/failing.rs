//! Failing generator - every call errors.

use planner_core::{async_trait, ChatMessage, GenerationError, TextGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Failure {
    Network(String),
    Api { status: u16, message: String },
    InvalidResponse(String),
}

/// A generator whose every call fails with the configured error.
#[derive(Debug)]
pub struct FailingGenerator {
    failure: Failure,
    attempts: AtomicUsize,
}

impl FailingGenerator {
    /// Fail with [`GenerationError::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::with(Failure::Network(message.into()))
    }

    /// Fail with [`GenerationError::Api`].
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::with(Failure::Api {
            status,
            message: message.into(),
        })
    }

    /// Fail with [`GenerationError::InvalidResponse`].
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::with(Failure::InvalidResponse(message.into()))
    }

    fn with(failure: Failure) -> Self {
        Self {
            failure,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of generate calls made.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _conversation: &[ChatMessage]) -> Result<String, GenerationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(match &self.failure {
            Failure::Network(message) => GenerationError::Network(message.clone()),
            Failure::Api { status, message } => GenerationError::Api {
                status: *status,
                message: message.clone(),
            },
            Failure::InvalidResponse(message) => GenerationError::InvalidResponse(message.clone()),
        })
    }

    fn name(&self) -> &str {
        "FailingGenerator"
    }
}
