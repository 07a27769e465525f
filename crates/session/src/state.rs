//! Preference snapshots.

use data_loader::{Book, Catalog};
use pipeline::FilterCriteria;
use similarity::ScalerSet;
use std::sync::Arc;

/// One snapshot of a conversation's preferences.
///
/// Snapshots are never mutated once built. Books are shared through `Arc`,
/// so cloning a snapshot is cheap and behaves like a deep copy.
#[derive(Debug, Clone)]
pub struct PreferenceState {
    pub filters: FilterCriteria,
    /// Liked book titles, in the order they were first given
    pub likes: Vec<String>,
    /// Disliked book titles, in the order they were first given
    pub dislikes: Vec<String>,
    /// Full catalog narrowed by `filters`
    pub candidates: Arc<Catalog>,
    /// Numeric scalers fitted on `candidates`
    pub scalers: ScalerSet,
}

impl PreferenceState {
    /// Empty preferences over the full catalog
    pub fn seed(full: Arc<Catalog>) -> Self {
        let scalers = ScalerSet::fit_all(&full);
        Self {
            filters: FilterCriteria::default(),
            likes: Vec::new(),
            dislikes: Vec::new(),
            candidates: full,
            scalers,
        }
    }

    /// Build the snapshot that layers `update` on top of this one.
    ///
    /// Filters are merged and re-applied to the full catalog, never to the
    /// previous candidates.
    pub fn layered(&self, full: &Catalog, update: &PreferenceUpdate) -> Self {
        let filters = self.filters.merge(&update.filters);
        let candidates = filters.apply(full);
        let scalers = ScalerSet::fit_all(&candidates);
        Self {
            filters,
            likes: append_new(&self.likes, &update.likes),
            dislikes: append_new(&self.dislikes, &update.dislikes),
            candidates: Arc::new(candidates),
            scalers,
        }
    }

    pub fn has_likes(&self) -> bool {
        !self.likes.is_empty()
    }

    pub fn candidate_books(&self) -> &[Arc<Book>] {
        self.candidates.books()
    }
}

/// New filters and feedback to layer onto the current snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceUpdate {
    pub filters: FilterCriteria,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.likes.is_empty() && self.dislikes.is_empty()
    }

    pub fn with_filters(mut self, filters: FilterCriteria) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_likes<S: Into<String>>(mut self, likes: impl IntoIterator<Item = S>) -> Self {
        self.likes = likes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dislikes<S: Into<String>>(mut self, dislikes: impl IntoIterator<Item = S>) -> Self {
        self.dislikes = dislikes.into_iter().map(Into::into).collect();
        self
    }
}

/// Append entries of `newer` missing from `older`, keeping first-seen order
fn append_new(older: &[String], newer: &[String]) -> Vec<String> {
    let mut merged = older.to_vec();
    for title in newer {
        if !merged.contains(title) {
            merged.push(title.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_new_dedups_exact_matches() {
        let older = vec!["Emma".to_string()];
        let newer = vec!["Dune".to_string(), "Emma".to_string(), "emma".to_string()];
        assert_eq!(append_new(&older, &newer), vec!["Emma", "Dune", "emma"]);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(PreferenceUpdate::default().is_empty());
        assert!(!PreferenceUpdate::default().with_likes(["Emma"]).is_empty());
    }
}
