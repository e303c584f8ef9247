//! Sign-in, sign-up and form switching.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use planner::SIGN_UP_NOTICE;
use serde::Deserialize;
use tracing::{info, warn};

use crate::cookie;
use crate::state::AppState;

/// Credentials posted by the login and sign-up forms.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Redirect to the index page, setting the cookie when a key was issued.
fn back_home(key: &str, issued: bool) -> Response {
    if issued {
        ([(header::SET_COOKIE, cookie::set_session(key))], Redirect::to("/")).into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

/// Sign in and move the client to the planner.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<Credentials>,
) -> Response {
    let key = cookie::session_key(&headers);

    match state.planner.identity.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let token = state.sessions.sign_in(key.as_deref(), session).await;
            ([(header::SET_COOKIE, cookie::set_session(&token))], Redirect::to("/")).into_response()
        }
        Err(err) => {
            warn!(error = %err, "Login failed");
            let (key, issued, ()) = state
                .sessions
                .upsert(key.as_deref(), |client| {
                    client.state.show_login();
                    client.flash.error = Some(format!("Login failed: {}", err));
                })
                .await;
            back_home(&key, issued)
        }
    }
}

/// Create an account, then show the login form with a notice.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<Credentials>,
) -> Response {
    let key = cookie::session_key(&headers);

    let result = state.planner.identity.sign_up(&form.email, &form.password).await;
    if let Err(err) = &result {
        warn!(error = %err, "Sign-up failed");
    }

    let (key, issued, ()) = state
        .sessions
        .upsert(key.as_deref(), |client| match result {
            Ok(user_id) => {
                info!(user_id = %user_id, "Signed up");
                client.state.show_login();
                client.flash.notice = Some(SIGN_UP_NOTICE.to_string());
            }
            Err(err) => {
                client.state.show_sign_up();
                client.flash.error = Some(format!("Sign-up failed: {}", err));
            }
        })
        .await;

    back_home(&key, issued)
}

/// Sign out and forget the session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(key) = cookie::session_key(&headers) {
        state.sessions.sign_out(&key).await;
    }
    ([(header::SET_COOKIE, cookie::clear_session())], Redirect::to("/")).into_response()
}

/// Switch to the sign-up form.
pub async fn show_signup(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let key = cookie::session_key(&headers);
    let (key, issued, ()) = state
        .sessions
        .upsert(key.as_deref(), |client| client.state.show_sign_up())
        .await;
    back_home(&key, issued)
}

/// Switch to the login form.
///
/// Clients without a stored session already see the login form, so nothing
/// is stored for them.
pub async fn show_login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(key) = cookie::session_key(&headers) {
        state
            .sessions
            .update_existing(&key, |client| client.state.show_login())
            .await;
    }
    Redirect::to("/").into_response()
}
