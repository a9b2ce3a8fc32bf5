//! Bounded undo history.
//!
//! History is a stack of document snapshots, most recent last. Pushing past the
//! limit evicts the oldest snapshot. There is no redo: undo pops a snapshot and
//! nothing records the state that was undone.

use crate::document::node::JsonObject;
use std::collections::VecDeque;

/// Number of snapshots kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Stack of prior documents.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<JsonObject>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Creates an empty history holding at most `limit` snapshots.
    ///
    /// A limit of zero keeps nothing, so undo is never possible.
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records a snapshot, evicting the oldest one when full.
    pub fn push(&mut self, snapshot: JsonObject) {
        if self.limit == 0 {
            return;
        }
        while self.snapshots.len() >= self.limit {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<JsonObject> {
        self.snapshots.pop_back()
    }

    /// The snapshot `pop` would return next.
    pub fn peek(&self) -> Option<&JsonObject> {
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
