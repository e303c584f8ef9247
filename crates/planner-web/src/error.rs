//! Error types for the web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use planner::PlannerError;
use thiserror::Error;

/// Errors returned by JSON endpoints.
#[derive(Debug, Error)]
pub enum WebError {
    /// No signed-in session for the request.
    #[error("{0}")]
    Unauthorized(#[from] PlannerError),

    /// The request was understood but cannot be served.
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WebError::Unauthorized(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for web handlers.
pub type Result<T> = std::result::Result<T, WebError>;
