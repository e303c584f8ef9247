//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use planner::{Planner, SessionState, UserSession};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Anonymous clients kept at once before the least recently seen is evicted.
pub const MAX_ANONYMOUS_SESSIONS: usize = 1024;

/// Idle time after which an anonymous client is forgotten.
pub const ANONYMOUS_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// One-shot messages for the next page render.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flash {
    pub notice: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

/// One browser or API client.
#[derive(Debug)]
pub struct Client {
    pub state: SessionState,
    pub flash: Flash,
    last_seen: Instant,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            state: SessionState::default(),
            flash: Flash::default(),
            last_seen: Instant::now(),
        }
    }
}

/// Process-local session table, keyed by session token.
///
/// Keys are always issued by the server: a client presenting a key the table
/// does not know gets a fresh one. Anonymous entries are bounded in number
/// and expire when idle; signing in re-keys the entry under the auth token.
#[derive(Clone)]
pub struct Sessions {
    inner: Arc<RwLock<HashMap<String, Client>>>,
    max_anonymous: usize,
    anonymous_ttl: Duration,
}

impl Default for Sessions {
    fn default() -> Self {
        Self::with_limits(MAX_ANONYMOUS_SESSIONS, ANONYMOUS_SESSION_TTL)
    }
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_anonymous: usize, anonymous_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_anonymous: max_anonymous.max(1),
            anonymous_ttl,
        }
    }

    /// Run `f` against the client under `key`, or against a newly issued
    /// anonymous client when `key` is absent or unknown.
    ///
    /// Returns the key the client now lives under, whether it was issued by
    /// this call, and the result of `f`.
    pub async fn upsert<R>(
        &self,
        key: Option<&str>,
        f: impl FnOnce(&mut Client) -> R,
    ) -> (String, bool, R) {
        let mut sessions = self.inner.write().await;
        let now = Instant::now();

        if let Some(key) = key {
            if let Some(client) = sessions.get_mut(key) {
                client.last_seen = now;
                let result = f(client);
                return (key.to_string(), false, result);
            }
        }

        self.make_room(&mut sessions, now);

        let key = Uuid::new_v4().to_string();
        let mut client = Client::default();
        let result = f(&mut client);
        sessions.insert(key.clone(), client);
        (key, true, result)
    }

    /// Run `f` against the client under `key` only if it exists.
    pub async fn update_existing<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Client) -> R,
    ) -> Option<R> {
        let mut sessions = self.inner.write().await;
        let client = sessions.get_mut(key)?;
        client.last_seen = Instant::now();
        Some(f(client))
    }

    /// Current state and pending flash messages, which are consumed.
    pub async fn take(&self, key: &str) -> (SessionState, Flash) {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(key) {
            Some(client) => {
                client.last_seen = Instant::now();
                (client.state.clone(), std::mem::take(&mut client.flash))
            }
            None => (SessionState::default(), Flash::default()),
        }
    }

    /// The signed-in user stored under `key`.
    pub async fn user(&self, key: &str) -> Option<UserSession> {
        let sessions = self.inner.read().await;
        sessions
            .get(key)
            .and_then(|client| client.state.user())
            .cloned()
    }

    /// Replace the entry under `old_key` with an authenticated one under the
    /// session's token.
    ///
    /// A restore warning on the session becomes a one-shot warning.
    pub async fn sign_in(&self, old_key: Option<&str>, mut session: UserSession) -> String {
        let token = session.token.clone();
        let mut client = Client::default();
        client.flash.warning = session.restore_warning.take();
        client.state.authenticate(session);

        let mut sessions = self.inner.write().await;
        if let Some(old_key) = old_key {
            sessions.remove(old_key);
        }
        sessions.insert(token.clone(), client);
        token
    }

    /// Drop the entry under `key`, signing its user out.
    pub async fn sign_out(&self, key: &str) {
        let mut sessions = self.inner.write().await;
        if let Some(mut client) = sessions.remove(key) {
            client.state.sign_out();
        }
    }

    /// Drop idle anonymous clients, then evict the least recently seen ones
    /// until a new anonymous client fits.
    fn make_room(&self, sessions: &mut HashMap<String, Client>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, client| {
            client.state.is_authenticated()
                || now.duration_since(client.last_seen) < self.anonymous_ttl
        });

        let mut anonymous: Vec<(Instant, String)> = sessions
            .iter()
            .filter(|(_, client)| !client.state.is_authenticated())
            .map(|(key, client)| (client.last_seen, key.clone()))
            .collect();

        if anonymous.len() >= self.max_anonymous {
            anonymous.sort();
            let excess = anonymous.len() + 1 - self.max_anonymous;
            for (_, key) in anonymous.into_iter().take(excess) {
                sessions.remove(&key);
            }
        }

        let dropped = before - sessions.len();
        if dropped > 0 {
            debug!(dropped, "Dropped anonymous sessions");
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Generator, history and identity services.
    pub planner: Planner,
    /// Signed-in and anonymous clients.
    pub sessions: Sessions,
    /// Itineraries shown in the history list.
    pub history_limit: usize,
}

impl AppState {
    /// Create new application state.
    pub fn new(planner: Planner, history_limit: usize) -> Self {
        Self::with_sessions(planner, Sessions::new(), history_limit)
    }

    pub fn with_sessions(planner: Planner, sessions: Sessions, history_limit: usize) -> Self {
        Self {
            planner,
            sessions,
            history_limit,
        }
    }
}
