//! Bounded buffer of the most recent conversation turns.
//!
//! Mirrors the session-side cache of a user's latest messages: oldest
//! entries are evicted once the capacity is reached.

use std::collections::VecDeque;

use crate::message::ChatMessage;

/// Number of recent messages kept for a signed-in user.
pub const DEFAULT_RECENT_CAPACITY: usize = 8;

/// Fixed-capacity buffer ordered oldest-first, newest-last.
///
/// # Example
///
/// ```rust
/// use planner_core::{ChatMessage, RecentMessages};
///
/// let mut recent = RecentMessages::with_capacity(2);
/// recent.push(ChatMessage::user("one"));
/// recent.push(ChatMessage::user("two"));
/// recent.push(ChatMessage::user("three"));
///
/// let contents: Vec<_> = recent.iter().map(|m| m.content.as_str()).collect();
/// assert_eq!(contents, ["two", "three"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentMessages {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Default for RecentMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentMessages {
    /// Create an empty buffer holding [`DEFAULT_RECENT_CAPACITY`] messages.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECENT_CAPACITY)
    }

    /// Create an empty buffer with a custom capacity (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a buffer from messages in chronological order.
    ///
    /// Only the newest `capacity` messages are kept.
    pub fn from_messages(messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        let mut recent = Self::new();
        recent.extend(messages);
        recent
    }

    /// Append a message, evicting the oldest when full.
    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.back()
    }
}

impl Extend<ChatMessage> for RecentMessages {
    fn extend<T: IntoIterator<Item = ChatMessage>>(&mut self, iter: T) {
        for message in iter {
            self.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ninth_message_evicts_oldest() {
        let mut recent = RecentMessages::new();
        for i in 0..8 {
            recent.push(ChatMessage::user(format!("message {}", i)));
        }
        assert_eq!(recent.len(), 8);

        recent.push(ChatMessage::assistant("message 8"));

        assert_eq!(recent.len(), 8);
        assert_eq!(recent.iter().next().unwrap().content, "message 1");
        assert_eq!(recent.last().unwrap().content, "message 8");
    }

    #[test]
    fn test_from_messages_keeps_newest() {
        let messages = (0..12).map(|i| ChatMessage::user(i.to_string()));
        let recent = RecentMessages::from_messages(messages);

        let contents: Vec<_> = recent.iter().map(|m| m.content.clone()).collect();
        assert_eq!(contents, ["4", "5", "6", "7", "8", "9", "10", "11"]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut recent = RecentMessages::with_capacity(0);
        recent.push(ChatMessage::user("a"));
        recent.push(ChatMessage::user("b"));

        assert_eq!(recent.capacity(), 1);
        assert_eq!(recent.last().unwrap().content, "b");
    }
}
