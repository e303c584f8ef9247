//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role written on every itinerary record.
pub const ITINERARY_ROLE: &str = "assistant";

/// An email/password account of the built-in auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Account UUID, also the user id that partitions stored data
    pub id: String,
    /// Lowercased email address
    pub email: String,
    /// Argon2id hash in PHC string form
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// One turn of a user's conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredMessage {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// "system", "user" or "assistant"
    pub role: String,
    /// Message body.
    pub content: String,
    /// Write timestamp (UTC, millisecond resolution).
    pub ts: String,
}

/// One generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ItineraryRecord {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Always "assistant".
    pub role: String,
    /// Markdown itinerary text.
    pub content: String,
    /// Write timestamp (UTC, millisecond resolution).
    pub ts: String,
}
