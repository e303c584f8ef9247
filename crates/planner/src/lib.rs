//! Itinerary planning flow for the AI travel planner.
//!
//! This crate wires the text generator, the document store and the
//! authentication backend together:
//!
//! - [`ItineraryGenerator`] - Builds prompts, calls the generator once, stores the result
//! - [`ItineraryHistory`] - Reads a user's past itineraries, newest first
//! - [`Identity`] / [`SessionState`] - Sign-in, sign-up and screen state
//! - [`Planner`] - Application context holding all of the above
//!
//! # Flow
//!
//! ```text
//! SessionState ── sign_in ──▶ Authenticated(UserSession)
//!                                   │
//!                   TripRequest + user_id
//!                                   ▼
//!                     ItineraryGenerator ──▶ TextGenerator (one call)
//!                                   │
//!                                   ▼
//!                            ItineraryStore ◀── ItineraryHistory
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use planner::{LocalAuth, Planner, SqliteStore};
//! use planner_core::{Interest, Pace, TextGenerator, TripRequest};
//!
//! # async fn example(generator: Arc<dyn TextGenerator>, db: planner_database::Database) {
//! let store = Arc::new(SqliteStore::new(db.clone()));
//! let auth = Arc::new(LocalAuth::new(db));
//! let planner = Planner::new(generator, store, auth);
//!
//! let request = TripRequest {
//!     origin: "Hanoi".to_string(),
//!     destination: "Da Nang, Vietnam".to_string(),
//!     start_date: "2024-03-01".to_string(),
//!     end_date: "2024-03-03".to_string(),
//!     interests: vec![Interest::Food, Interest::Nature],
//!     pace: Pace::Normal,
//! };
//! let outcome = planner.generator.generate_itinerary(&request, "user-1").await;
//! println!("{}", outcome.display_text());
//! # }
//! ```

mod auth;
mod error;
mod firebase;
mod generator;
mod history;
mod session;
mod store;

use std::sync::Arc;

pub use auth::{AuthProvider, AuthSession, LocalAuth};
pub use error::{AuthError, PlannerError};
pub use firebase::{FirebaseAuth, FirebaseConfig, DEFAULT_FIREBASE_AUTH_URL};
pub use generator::{ItineraryGenerator, ItineraryOutcome};
pub use history::{format_timestamp, HistoryEntry, HistoryView, ItineraryHistory, DEFAULT_HISTORY_LIMIT};
pub use session::{Identity, SessionState, UserSession, SIGN_UP_NOTICE, WELCOME_MESSAGE};
pub use store::{ConversationStore, ItineraryStore, SqliteStore};

use planner_core::TextGenerator;

/// Application context: one explicitly constructed set of services.
#[derive(Clone)]
pub struct Planner {
    pub generator: Arc<ItineraryGenerator>,
    pub history: ItineraryHistory,
    pub identity: Identity,
}

impl Planner {
    /// Build the services around one store and one auth provider.
    ///
    /// Generated itineraries are also recorded in the conversation log so a
    /// later sign-in restores them into the session.
    pub fn new<S>(generator: Arc<dyn TextGenerator>, store: Arc<S>, auth: Arc<dyn AuthProvider>) -> Self
    where
        S: ConversationStore + ItineraryStore + 'static,
    {
        let itineraries: Arc<dyn ItineraryStore> = store.clone();
        let conversations: Arc<dyn ConversationStore> = store;

        let generator = ItineraryGenerator::new(generator, itineraries.clone())
            .with_conversation_log(conversations.clone());

        Self {
            generator: Arc::new(generator),
            history: ItineraryHistory::new(itineraries),
            identity: Identity::new(auth, conversations),
        }
    }
}
