//! Dislike penalty.
//!
//! ```text
//! penalty = max(0, max_similarity_to_disliked) * penalty_factor
//! score   = max(score * (1 - penalty), 0)
//! ```

use data_loader::{Book, BookId};
use similarity::{CompositeMetric, Weights};
use std::collections::HashSet;
use std::sync::Arc;

/// Default share of the dislike similarity taken off a score
pub const DEFAULT_PENALTY_FACTOR: f32 = 0.7;

/// Penalizes candidates that resemble disliked books
#[derive(Debug, Clone)]
pub struct DislikePenalty {
    disliked: Vec<Arc<Book>>,
    disliked_ids: HashSet<BookId>,
    factor: f32,
}

impl DislikePenalty {
    /// `factor` is clamped to `[0, 1]`
    pub fn new(disliked: Vec<Arc<Book>>, factor: f32) -> Self {
        let disliked_ids = disliked.iter().map(|book| book.id).collect();
        Self {
            disliked,
            disliked_ids,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.disliked.is_empty()
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Disliked books are removed from the results entirely
    pub fn excludes(&self, id: BookId) -> bool {
        self.disliked_ids.contains(&id)
    }

    /// Highest similarity to any disliked book, never below zero
    pub fn max_similarity(&self, metric: &CompositeMetric, book: &Book, weights: &Weights) -> f32 {
        self.disliked
            .iter()
            .map(|disliked| metric.similarity(book, disliked, weights))
            .fold(0.0, f32::max)
    }

    /// Penalized score, floored at zero
    pub fn apply(&self, metric: &CompositeMetric, book: &Book, score: f32, weights: &Weights) -> f32 {
        if self.is_empty() {
            return score;
        }
        let penalty = self.max_similarity(metric, book, weights) * self.factor;
        (score * (1.0 - penalty)).max(0.0)
    }
}
