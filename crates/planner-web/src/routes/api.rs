//! JSON endpoints for API clients.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use planner::{HistoryView, PlannerError, UserSession};
use planner_core::TripRequest;
use serde::{Deserialize, Serialize};

use super::planner::DATE_ORDER_ERROR;
use crate::cookie;
use crate::error::{Result, WebError};
use crate::state::AppState;

/// Most itineraries one history request returns.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Query for the history endpoint.
#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Result of an itinerary request.
#[derive(Serialize)]
pub struct ItineraryResponse {
    /// Generated Markdown, absent when generation failed.
    pub itinerary: Option<String>,
    /// Why generation failed.
    pub error: Option<String>,
    /// Id of the stored record.
    pub saved_id: Option<i64>,
    /// Why the save failed.
    pub save_error: Option<String>,
    /// What a user would be shown.
    pub display_text: String,
}

async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<UserSession> {
    let key = cookie::session_key(headers).ok_or(PlannerError::NotAuthenticated)?;
    let user = state
        .sessions
        .user(&key)
        .await
        .ok_or(PlannerError::NotAuthenticated)?;
    Ok(user)
}

/// Recent itineraries of the signed-in user, newest first.
pub async fn history_api(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryView>> {
    let user = require_user(&state, &headers).await?;
    let limit = query
        .limit
        .unwrap_or(state.history_limit)
        .min(MAX_HISTORY_LIMIT);

    let view = state
        .planner
        .history
        .load_itinerary_history(&user.user_id, limit)
        .await;
    Ok(Json(view))
}

/// Generate and store an itinerary.
pub async fn itinerary_api(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TripRequest>,
) -> Result<Json<ItineraryResponse>> {
    let user = require_user(&state, &headers).await?;
    if request.ends_before_start() {
        return Err(WebError::BadRequest(DATE_ORDER_ERROR.to_string()));
    }

    let outcome = state
        .planner
        .generator
        .generate_itinerary(&request, &user.user_id)
        .await;
    let display_text = outcome.display_text();

    let (itinerary, error) = match outcome.generation {
        Ok(text) => (Some(text), None),
        Err(err) => (None, Some(err.to_string())),
    };

    Ok(Json(ItineraryResponse {
        itinerary,
        error,
        saved_id: outcome.saved_id,
        save_error: outcome.save_error,
        display_text,
    }))
}
