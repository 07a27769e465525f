//! Composite weighted distance between two books.
//!
//! ```text
//! distance = w.genre             * genre_distance
//!          + w.author            * (author differs)
//!          + w.publisher         * (publisher differs)
//!          + w.language          * (language differs)
//!          + w.has_illustrations * (illustrations differ)
//!          + w.numerical         * (|Δ norm year| + |Δ norm pages|)
//! similarity = 1 - distance
//! ```
//!
//! The distance is not renormalized by the weight sum, so similarity can drop
//! below zero. Callers compare similarities relatively and never clamp them.

use crate::error::{Result, SimilarityError};
use crate::scaler::{NumericFeature, ScalerSet};
use crate::taxonomy::GenreTaxonomy;
use crate::weights::Weights;
use data_loader::{Book, BookId, Catalog};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Per-feature sub-distances between two books, before weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBreakdown {
    pub genre: f32,
    pub author: f32,
    pub publisher: f32,
    pub language: f32,
    pub has_illustrations: f32,
    pub numerical: f32,
}

impl DistanceBreakdown {
    pub fn weighted(&self, weights: &Weights) -> f32 {
        weights.genre * self.genre
            + weights.author * self.author
            + weights.publisher * self.publisher
            + weights.language * self.language
            + weights.has_illustrations * self.has_illustrations
            + weights.numerical * self.numerical
    }
}

/// Weighted book distance over one catalog snapshot.
///
/// The numeric scalers are fitted when the metric is built, so a metric must
/// be rebuilt for every new snapshot it scores.
#[derive(Debug, Clone)]
pub struct CompositeMetric {
    taxonomy: Arc<GenreTaxonomy>,
    scalers: ScalerSet,
}

impl CompositeMetric {
    pub fn new(taxonomy: Arc<GenreTaxonomy>, scalers: ScalerSet) -> Self {
        Self { taxonomy, scalers }
    }

    /// Fit numeric scalers over `catalog` and build a metric for it
    pub fn fit(catalog: &Catalog, taxonomy: Arc<GenreTaxonomy>) -> Self {
        let scalers = ScalerSet::fit_all(catalog);
        debug!("Fitted composite metric over {} books", catalog.len());
        Self::new(taxonomy, scalers)
    }

    pub fn taxonomy(&self) -> &Arc<GenreTaxonomy> {
        &self.taxonomy
    }

    pub fn scalers(&self) -> &ScalerSet {
        &self.scalers
    }

    /// Genre sub-distance. Identical labels are always at distance 0, even
    /// when the taxonomy does not know them.
    pub fn genre_distance(&self, a: &Book, b: &Book) -> f32 {
        if a.genre == b.genre {
            0.0
        } else {
            self.taxonomy.distance(&a.genre, &b.genre)
        }
    }

    /// Manhattan distance over normalized year and pages
    pub fn numerical_distance(&self, a: &Book, b: &Book) -> f32 {
        [NumericFeature::Year, NumericFeature::Pages]
            .iter()
            .map(|&feature| {
                (self.scalers.normalize_book(feature, a) - self.scalers.normalize_book(feature, b))
                    .abs()
            })
            .sum()
    }

    pub fn breakdown(&self, a: &Book, b: &Book) -> DistanceBreakdown {
        DistanceBreakdown {
            genre: self.genre_distance(a, b),
            author: categorical(&a.author, &b.author),
            publisher: categorical(&a.publisher, &b.publisher),
            language: categorical(&a.language, &b.language),
            has_illustrations: categorical(&a.has_illustrations, &b.has_illustrations),
            numerical: self.numerical_distance(a, b),
        }
    }

    pub fn distance(&self, a: &Book, b: &Book, weights: &Weights) -> f32 {
        self.breakdown(a, b).weighted(weights)
    }

    pub fn similarity(&self, a: &Book, b: &Book, weights: &Weights) -> f32 {
        1.0 - self.distance(a, b, weights)
    }

    /// Top `n` books most similar to the book at `position`, as
    /// `(position, similarity)` pairs.
    ///
    /// The book itself is excluded. Ties keep catalog order. An out-of-range
    /// position yields no results.
    #[instrument(skip(self, catalog, weights))]
    pub fn similar_books(
        &self,
        catalog: &Catalog,
        position: usize,
        n: usize,
        weights: &Weights,
    ) -> Vec<(usize, f32)> {
        let Some(target) = catalog.get(position) else {
            debug!("Position {} outside catalog of {} books", position, catalog.len());
            return Vec::new();
        };

        let mut scored: Vec<(usize, f32)> = catalog
            .books()
            .par_iter()
            .enumerate()
            .filter(|(idx, _)| *idx != position)
            .map(|(idx, book)| (idx, self.similarity(target, book, weights)))
            .collect();

        // Stable sort keeps catalog order between equal similarities
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(n);
        scored
    }

    /// Same as [`similar_books`](Self::similar_books), addressed by book id
    pub fn similar_to(
        &self,
        catalog: &Catalog,
        id: BookId,
        n: usize,
        weights: &Weights,
    ) -> Result<Vec<(Arc<Book>, f32)>> {
        let position = catalog
            .position_of(id)
            .ok_or(SimilarityError::BookNotFound(id))?;

        Ok(self
            .similar_books(catalog, position, n, weights)
            .into_iter()
            .filter_map(|(idx, sim)| catalog.books().get(idx).map(|b| (Arc::clone(b), sim)))
            .collect())
    }

    /// Full pairwise distance matrix, indexed by catalog position
    #[instrument(skip_all, fields(books = catalog.len()))]
    pub fn pairwise(&self, catalog: &Catalog, weights: &Weights) -> Vec<Vec<f32>> {
        catalog
            .books()
            .par_iter()
            .map(|a| {
                catalog
                    .iter()
                    .map(|b| self.distance(a, b, weights))
                    .collect()
            })
            .collect()
    }
}

fn categorical<T: PartialEq + ?Sized>(a: &T, b: &T) -> f32 {
    if a == b { 0.0 } else { 1.0 }
}
