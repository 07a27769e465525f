//! Bounded undo history of preference snapshots.

use crate::state::PreferenceState;
use std::collections::VecDeque;

/// Stack of snapshots, oldest evicted first once `capacity` is reached.
///
/// The stack is never empty: the top is the current snapshot.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: VecDeque<PreferenceState>,
    capacity: usize,
}

impl HistoryStack {
    /// `capacity` is raised to 1 if lower
    pub fn new(seed: PreferenceState, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(seed);
        Self {
            snapshots,
            capacity,
        }
    }

    pub fn current(&self) -> &PreferenceState {
        // The seed is never popped, so the deque always has a back element
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, snapshot: PreferenceState) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Drop the current snapshot. Returns `false`, leaving the stack
    /// untouched, when only one snapshot remains.
    pub fn pop(&mut self) -> bool {
        if self.snapshots.len() <= 1 {
            return false;
        }
        self.snapshots.pop_back();
        true
    }

    /// Replace the whole history with a single snapshot
    pub fn reset(&mut self, seed: PreferenceState) {
        self.snapshots.clear();
        self.snapshots.push_back(seed);
    }
}
