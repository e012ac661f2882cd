use std::collections::VecDeque;

use relay_core::Turn;

/// Ordered turns of one conversation, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: VecDeque<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `turn` and drops the oldest turns until at most `max_turns` remain.
    /// Returns how many were dropped.
    pub fn push_bounded(&mut self, turn: Turn, max_turns: usize) -> usize {
        self.turns.push_back(turn);
        let mut evicted = 0;
        while self.turns.len() > max_turns {
            self.turns.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Removes and returns the oldest turn.
    pub fn pop_oldest(&mut self) -> Option<Turn> {
        self.turns.pop_front()
    }

    pub fn turns(&self) -> impl DoubleEndedIterator<Item = &Turn> + ExactSizeIterator {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }
}

impl FromIterator<Turn> for ConversationHistory {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}
