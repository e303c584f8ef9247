//! Itinerary history for display.

use std::sync::Arc;

use chrono::DateTime;
use planner_database::ItineraryRecord;
use serde::Serialize;
use tracing::warn;

use crate::store::ItineraryStore;

/// Default number of itineraries shown.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// One itinerary as shown in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Always "assistant".
    pub role: String,
    /// Markdown itinerary.
    pub content: String,
    /// Raw store timestamp.
    pub ts: String,
    /// Timestamp as `YYYY-MM-DD HH:MM`, empty when unparsable.
    pub created_label: String,
}

impl From<ItineraryRecord> for HistoryEntry {
    fn from(record: ItineraryRecord) -> Self {
        let created_label = format_timestamp(&record.ts);
        Self {
            role: record.role,
            content: record.content,
            ts: record.ts,
            created_label,
        }
    }
}

/// History read for one user.
///
/// A failed read leaves `entries` empty and sets `warning`; callers that
/// only look at `entries` cannot tell the two cases apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
    pub warning: Option<String>,
}

impl HistoryView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads a user's past itineraries, newest first.
#[derive(Clone)]
pub struct ItineraryHistory {
    store: Arc<dyn ItineraryStore>,
}

impl ItineraryHistory {
    pub fn new(store: Arc<dyn ItineraryStore>) -> Self {
        Self { store }
    }

    /// Load up to `limit` itineraries, newest first.
    pub async fn load_itinerary_history(&self, user_id: &str, limit: usize) -> HistoryView {
        match self.store.load_itinerary_history(user_id, limit).await {
            Ok(records) => HistoryView {
                entries: records.into_iter().map(HistoryEntry::from).collect(),
                warning: None,
            },
            Err(err) => {
                warn!(user_id, error = %err, "Failed to load itinerary history");
                HistoryView {
                    entries: Vec::new(),
                    warning: Some(format!("Failed to load history: {}", err)),
                }
            }
        }
    }
}

/// Format a stored RFC 3339 timestamp as `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
