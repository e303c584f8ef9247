//! Session state and the sign-in / sign-up flow.

use std::sync::Arc;

use planner_core::{ChatMessage, RecentMessages, DEFAULT_RECENT_CAPACITY};
use tracing::{info, warn};

use crate::auth::AuthProvider;
use crate::error::AuthError;
use crate::store::ConversationStore;

/// Message seeded into a session when the user has no stored conversation.
pub const WELCOME_MESSAGE: &str = "Welcome back! You can now create your travel itinerary";

/// Notice shown after a successful sign-up.
pub const SIGN_UP_NOTICE: &str = "Account created successfully! Please log in.";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub token: String,
    /// Latest conversation turns, oldest first.
    pub recent: RecentMessages,
    /// Set when stored messages could not be read at sign-in.
    pub restore_warning: Option<String>,
}

/// Which screen a client is on.
///
/// A client that has not signed in starts on the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    ShowingLogin,
    ShowingSignUp,
    Authenticated(UserSession),
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch an anonymous client to the sign-up form.
    pub fn show_sign_up(&mut self) {
        if !self.is_authenticated() {
            *self = SessionState::ShowingSignUp;
        }
    }

    /// Switch an anonymous client to the login form.
    pub fn show_login(&mut self) {
        if !self.is_authenticated() {
            *self = SessionState::ShowingLogin;
        }
    }

    /// Enter the authenticated state.
    pub fn authenticate(&mut self, session: UserSession) {
        *self = SessionState::Authenticated(session);
    }

    /// Discard the user's session data and return to the login form.
    pub fn sign_out(&mut self) {
        if let SessionState::Authenticated(session) = self {
            info!(user_id = %session.user_id, "User signed out");
        }
        *self = SessionState::ShowingLogin;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserSession> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user_mut(&mut self) -> Option<&mut UserSession> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Signs users in and out against an [`AuthProvider`].
#[derive(Clone)]
pub struct Identity {
    auth: Arc<dyn AuthProvider>,
    conversations: Arc<dyn ConversationStore>,
}

impl Identity {
    pub fn new(auth: Arc<dyn AuthProvider>, conversations: Arc<dyn ConversationStore>) -> Self {
        Self {
            auth,
            conversations,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.auth.name()
    }

    /// Authenticate and build the user's session.
    ///
    /// The session starts with the user's last messages, or with the welcome
    /// message when none are stored or they cannot be read. A read failure
    /// does not block sign-in; it is reported through `restore_warning`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, AuthError> {
        let auth = self.auth.sign_in(email, password).await?;

        let (messages, restore_warning) = match self
            .conversations
            .load_last_messages(&auth.user_id, DEFAULT_RECENT_CAPACITY)
            .await
        {
            Ok(messages) => (messages, None),
            Err(err) => {
                warn!(user_id = %auth.user_id, error = %err, "Failed to load recent messages");
                (
                    Vec::new(),
                    Some(format!("Failed to load recent messages: {}", err)),
                )
            }
        };

        let recent = if messages.is_empty() {
            RecentMessages::from_messages([ChatMessage::assistant(WELCOME_MESSAGE)])
        } else {
            RecentMessages::from_messages(messages)
        };

        Ok(UserSession {
            user_id: auth.user_id,
            email: auth.email,
            token: auth.token,
            recent,
            restore_warning,
        })
    }

    /// Create an account; the user signs in separately afterwards.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.auth.sign_up(email, password).await
    }
}
