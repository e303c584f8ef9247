//! Storage seams for conversations and itineraries.
//!
//! The planner talks to storage only through these traits so the document
//! store can be swapped without touching the generator or history code.

use std::str::FromStr;

use async_trait::async_trait;
use planner_core::{ChatMessage, Role};
use planner_database::{conversation, itinerary, Database, ItineraryRecord, Result};
use tracing::warn;

/// SQLite takes a signed limit; anything past `i64::MAX` means "all rows".
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Append-only per-user conversation log.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append one message; the store assigns the timestamp.
    async fn save_message(&self, user_id: &str, role: Role, content: &str) -> Result<()>;

    /// The newest `limit` messages in chronological (oldest-first) order.
    async fn load_last_messages(&self, user_id: &str, limit: usize) -> Result<Vec<ChatMessage>>;
}

/// Append-only per-user itinerary log.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Append one itinerary; returns its id.
    async fn save_itinerary(&self, user_id: &str, content: &str) -> Result<i64>;

    /// The newest `limit` itineraries, newest first.
    async fn load_itinerary_history(&self, user_id: &str, limit: usize)
        -> Result<Vec<ItineraryRecord>>;
}

/// Both stores backed by the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn save_message(&self, user_id: &str, role: Role, content: &str) -> Result<()> {
        conversation::save_message(self.db.pool(), user_id, role.as_str(), content).await
    }

    async fn load_last_messages(&self, user_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let rows =
            conversation::load_last_messages(self.db.pool(), user_id, sql_limit(limit)).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let role = Role::from_str(&row.role).unwrap_or_else(|err| {
                    warn!(message_id = row.id, "{}, reading as assistant", err);
                    Role::Assistant
                });
                ChatMessage::new(role, row.content)
            })
            .collect())
    }
}

#[async_trait]
impl ItineraryStore for SqliteStore {
    async fn save_itinerary(&self, user_id: &str, content: &str) -> Result<i64> {
        itinerary::save_itinerary(self.db.pool(), user_id, content).await
    }

    async fn load_itinerary_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ItineraryRecord>> {
        itinerary::load_itinerary_history(self.db.pool(), user_id, sql_limit(limit)).await
    }
}
