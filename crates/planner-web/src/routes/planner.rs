//! The index page and the itinerary form.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Local;
use planner::{PlannerError, SessionState, UserSession};
use planner_core::ChatMessage;

use super::pages::{ItineraryForm, LoginTemplate, PlannerTemplate, SignUpTemplate, TripForm};
use crate::cookie;
use crate::markdown;
use crate::state::{AppState, Flash};

/// Shown when the end date is before the start date.
pub const DATE_ORDER_ERROR: &str = "End date must not be before start date.";

/// Render the page for the client's current state.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session, flash) = match cookie::session_key(&headers) {
        Some(key) => state.sessions.take(&key).await,
        None => (SessionState::default(), Flash::default()),
    };

    match session {
        SessionState::ShowingLogin => LoginTemplate {
            notice: flash.notice.unwrap_or_default(),
            error: flash.error.unwrap_or_default(),
        }
        .into_response(),
        SessionState::ShowingSignUp => SignUpTemplate {
            error: flash.error.unwrap_or_default(),
        }
        .into_response(),
        SessionState::Authenticated(user) => {
            let form = TripForm::defaults(Local::now().date_naive());
            let mut page = planner_page(&state, &user, form).await;
            page.notice = flash.notice.unwrap_or_default();
            page.error = flash.error.unwrap_or_default();
            page.warning = flash.warning.unwrap_or_default();
            page.into_response()
        }
    }
}

/// Generate an itinerary from the form and show it.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ItineraryForm>,
) -> Response {
    let key = cookie::session_key(&headers);
    let user = match &key {
        Some(key) => state.sessions.user(key).await,
        None => None,
    };

    let (Some(key), Some(user)) = (key, user) else {
        return refuse_anonymous(&state, &headers).await;
    };

    let request = form.into_request();
    if request.ends_before_start() {
        let mut page = planner_page(&state, &user, TripForm::from_request(&request)).await;
        page.error = DATE_ORDER_ERROR.to_string();
        return page.into_response();
    }

    let outcome = state
        .planner
        .generator
        .generate_itinerary(&request, &user.user_id)
        .await;
    let text = outcome.display_text();

    if let Ok(reply) = &outcome.generation {
        let prompt = planner_core::user_prompt(&request);
        let reply = reply.clone();
        state
            .sessions
            .update_existing(&key, move |client| {
                if let Some(session) = client.state.user_mut() {
                    session.recent.push(ChatMessage::user(prompt));
                    session.recent.push(ChatMessage::assistant(reply));
                }
            })
            .await;
    }

    let user = state.sessions.user(&key).await.unwrap_or(user);
    let mut page = planner_page(&state, &user, TripForm::from_request(&request)).await;
    page.result_html = markdown::to_html(&text);
    page.result_failed = !outcome.is_generated();
    page.into_response()
}

/// Send a client without a signed-in session back to the login form.
///
/// Only known sessions get a flash; anything else is answered directly.
async fn refuse_anonymous(state: &AppState, headers: &HeaderMap) -> Response {
    if let Some(key) = cookie::session_key(headers) {
        let flashed = state
            .sessions
            .update_existing(&key, |client| {
                client.flash.error = Some(PlannerError::NotAuthenticated.to_string())
            })
            .await;
        if flashed.is_some() {
            return Redirect::to("/").into_response();
        }
    }

    LoginTemplate {
        notice: String::new(),
        error: PlannerError::NotAuthenticated.to_string(),
    }
    .into_response()
}

async fn planner_page(state: &AppState, user: &UserSession, form: TripForm) -> PlannerTemplate {
    let history = state
        .planner
        .history
        .load_itinerary_history(&user.user_id, state.history_limit)
        .await;
    PlannerTemplate::new(user, form, history, state.history_limit)
}
