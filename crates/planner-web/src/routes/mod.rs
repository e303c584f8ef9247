//! Route handlers for the planner web interface.

pub mod api;
pub mod auth;
pub mod health;
pub mod pages;
pub mod planner;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(planner::index))
        .route("/itinerary", post(planner::generate))
        // Session forms
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/show/signup", post(auth::show_signup))
        .route("/show/login", post(auth::show_login))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/history", get(api::history_api))
        .route("/api/itinerary", post(api::itinerary_api))
}
