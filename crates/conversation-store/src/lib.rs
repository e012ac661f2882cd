//! # Conversation store
//!
//! Maps a [`ConversationKey`] to a [`ConversationHistory`] capped at `max_turns` turns.
//! Histories are created on the first appended turn and removed on reset. When an append pushes
//! a history past the cap, the oldest turns are evicted first.
//!
//! The store is an explicit object constructed once at startup and shared (via `Arc`) with the
//! session controller. Entries are locked per key, so concurrent appends or resets on the same
//! conversation are serialized while other conversations proceed.

mod history;

pub use history::ConversationHistory;

use dashmap::DashMap;
use relay_core::{ConversationKey, Turn};
use tracing::debug;

/// Default number of turns kept per conversation.
pub const DEFAULT_MAX_TURNS: usize = 15;

pub struct ConversationStore {
    histories: DashMap<ConversationKey, ConversationHistory>,
    max_turns: usize,
}

impl ConversationStore {
    /// Creates an empty store keeping at most `max_turns` turns per conversation (minimum 1).
    pub fn new(max_turns: usize) -> Self {
        Self {
            histories: DashMap::new(),
            max_turns: max_turns.max(1),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Returns a snapshot of the key's history, or an empty one. Never inserts.
    pub fn get_or_create(&self, key: &ConversationKey) -> ConversationHistory {
        self.histories
            .get(key)
            .map(|h| h.value().clone())
            .unwrap_or_default()
    }

    /// Appends a turn, creating the history if absent, then evicts down to `max_turns`.
    pub fn append(&self, key: &ConversationKey, turn: Turn) {
        let mut entry = self.histories.entry(key.clone()).or_default();
        let evicted = entry.push_bounded(turn, self.max_turns);
        if evicted > 0 {
            debug!(conversation = %key, evicted, len = entry.len(), "evicted oldest turns");
        }
    }

    /// Removes the key's history. Returns whether one existed; absence is not an error.
    pub fn reset(&self, key: &ConversationKey) -> bool {
        let removed = self.histories.remove(key).is_some();
        debug!(conversation = %key, removed, "conversation reset");
        removed
    }

    /// Number of turns stored for `key` (0 when absent).
    pub fn len(&self, key: &ConversationKey) -> usize {
        self.histories.get(key).map(|h| h.len()).unwrap_or(0)
    }

    /// Number of conversations with a stored history.
    pub fn conversation_count(&self) -> usize {
        self.histories.len()
    }

    /// Drops every history (shutdown).
    pub fn clear(&self) {
        self.histories.clear();
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}
