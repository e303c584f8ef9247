//! Error types for planner operations.

use planner_database::{DatabaseError, ValidationError};
use thiserror::Error;

/// Errors returned by authentication providers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Sign-up with an email that already has an account.
    #[error("an account already exists for {0}")]
    EmailTaken(String),

    /// Email or password failed validation.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// The remote provider refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The remote provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Account storage failed.
    #[error("storage error: {0}")]
    Database(#[from] DatabaseError),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The provider is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Errors that can occur in the planner flow.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// An action that needs a signed-in user was attempted anonymously.
    #[error("Please login first to generate and save itineraries.")]
    NotAuthenticated,

    /// Authentication failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Persistence failed.
    #[error("storage error: {0}")]
    Database(#[from] DatabaseError),
}
