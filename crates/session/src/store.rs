//! Layered preference state with bounded undo.
//!
//! ```text
//! layer(update)  push current.layered(update), evicting the oldest snapshot
//! step_back()    pop the current snapshot unless it is the only one
//! reset()        collapse to one empty snapshot over the full catalog
//! ```

use crate::config::MAX_HISTORY_STEPS;
use crate::history::HistoryStack;
use crate::state::{PreferenceState, PreferenceUpdate};
use data_loader::Catalog;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Outcome of a step back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBack {
    Undone,
    NothingToUndo,
}

pub struct PreferenceStateStore {
    full: Arc<Catalog>,
    history: HistoryStack,
}

impl PreferenceStateStore {
    /// A store seeded with empty preferences over `full`
    pub fn new(full: Arc<Catalog>) -> Self {
        let seed = PreferenceState::seed(Arc::clone(&full));
        Self {
            full,
            history: HistoryStack::new(seed, MAX_HISTORY_STEPS),
        }
    }

    /// Configure how many snapshots are kept (default: 5)
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        let current = self.history.current().clone();
        self.history = HistoryStack::new(current, max_history);
        self
    }

    pub fn full_catalog(&self) -> &Arc<Catalog> {
        &self.full
    }

    pub fn current(&self) -> &PreferenceState {
        self.history.current()
    }

    pub fn depth(&self) -> usize {
        self.history.depth()
    }

    /// Merge `update` into the current snapshot and push the result.
    ///
    /// Every call pushes a snapshot, even when the update changes nothing.
    #[instrument(skip_all, fields(depth = self.depth()))]
    pub fn layer(&mut self, update: &PreferenceUpdate) -> &PreferenceState {
        let next = self.history.current().layered(&self.full, update);
        debug!(
            "Layered preferences: {} candidates, {} likes, {} dislikes",
            next.candidates.len(),
            next.likes.len(),
            next.dislikes.len()
        );
        self.history.push(next);
        self.history.current()
    }

    /// Return to the previous snapshot
    pub fn step_back(&mut self) -> StepBack {
        if self.history.pop() {
            debug!("Stepped back to depth {}", self.depth());
            StepBack::Undone
        } else {
            debug!("Nothing to undo");
            StepBack::NothingToUndo
        }
    }

    /// Drop all history and start over from empty preferences
    pub fn reset(&mut self) -> &PreferenceState {
        self.history
            .reset(PreferenceState::seed(Arc::clone(&self.full)));
        info!("Preferences reset");
        self.history.current()
    }
}
