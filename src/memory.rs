//! Per-session conversation memory

use serde::{Deserialize, Serialize};

/// One completed question/answer exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user asked
    pub user_query: String,
    /// What the assistant answered
    pub assistant_answer: String,
}

/// Append-only, ordered log of a session's turns
///
/// Owned by the caller and passed into the pipeline by mutable reference,
/// one instance per session. Growth is unbounded within a session; reads
/// are bounded via [`recent`](Self::recent). Nothing persists across
/// process restarts.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed turn
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// The last `n` turns in chronological order
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns recorded
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether any turns have been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
