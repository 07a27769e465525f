//! Preference aggregation.
//!
//! Turns a set of liked and disliked books into a ranked list of candidates.
//!
//! ## Algorithm
//! 1. Resolve liked/disliked ids against the full catalog (unknown ids are dropped)
//! 2. For each candidate (liked books skipped, disliked books removed):
//!    a. Similarity to every liked book, reduced by the strategy
//!    b. Common-feature boost for boosting strategies
//!    c. Dislike penalty
//! 3. Stable sort by score, descending
//!
//! Similarities always use a metric fitted on the full catalog, so a liked
//! book keeps its influence after filters have removed it from the candidates.

use crate::booster::{BoostFactors, FeatureBooster, LikedProfile};
use crate::error::{RecommendError, Result};
use crate::penalty::{DislikePenalty, DEFAULT_PENALTY_FACTOR};
use crate::strategy::Strategy;
use data_loader::{Book, BookId, Catalog};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use similarity::{CompositeMetric, GenreTaxonomy, Weights};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of recommendations returned by `recommend`
pub const DEFAULT_LIMIT: usize = 5;

/// Minimum similarity for a liked book to be named in an explanation
pub const SIMILARITY_THRESHOLD: f32 = 0.3;

/// Knobs of one scoring request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    pub strategy: Strategy,
    /// Share of the dislike similarity removed from a score, in `[0, 1]`
    pub penalty_factor: f32,
    pub weights: Weights,
    pub boost: BoostFactors,
    /// Skip liked books when scoring candidates
    pub exclude_liked: bool,
    pub limit: usize,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            penalty_factor: DEFAULT_PENALTY_FACTOR,
            weights: Weights::default(),
            boost: BoostFactors::default(),
            exclude_liked: true,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ScoringOptions {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_penalty_factor(mut self, penalty_factor: f32) -> Self {
        self.penalty_factor = penalty_factor;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_exclude_liked(mut self, exclude_liked: bool) -> Self {
        self.exclude_liked = exclude_liked;
        self
    }
}

/// A scored candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub book: Arc<Book>,
    pub score: f32,
}

/// Why a book was recommended
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Explanation {
    /// Most similar liked book, when it clears `SIMILARITY_THRESHOLD`
    pub similar_to: Option<(String, f32)>,
    /// Genres and authors shared with liked books, without repeats
    pub shared_features: Vec<String>,
}

pub struct PreferenceAggregator {
    full: Arc<Catalog>,
    metric: CompositeMetric,
}

impl PreferenceAggregator {
    /// Build an aggregator over the full catalog
    pub fn new(full: Arc<Catalog>, taxonomy: Arc<GenreTaxonomy>) -> Self {
        let metric = CompositeMetric::fit(&full, taxonomy);
        Self { full, metric }
    }

    pub fn full_catalog(&self) -> &Arc<Catalog> {
        &self.full
    }

    pub fn metric(&self) -> &CompositeMetric {
        &self.metric
    }

    /// Look up ids in the full catalog, dropping unknown and repeated ones
    fn resolve(&self, ids: &[BookId]) -> Vec<Arc<Book>> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|&id| match self.full.position_of(id) {
                Some(pos) => self.full.books().get(pos).cloned(),
                None => {
                    debug!("Dropping unknown book id {}", id);
                    None
                }
            })
            .collect()
    }

    /// Score every candidate against the liked and disliked books.
    ///
    /// Returns all surviving candidates ranked by score; ties keep candidate
    /// order. Fails with `EmptyPreferences` when no liked id resolves.
    #[instrument(skip_all, fields(candidates = candidates.len(), liked = liked.len(), disliked = disliked.len(), strategy = %options.strategy))]
    pub fn score(
        &self,
        candidates: &Catalog,
        liked: &[BookId],
        disliked: &[BookId],
        options: &ScoringOptions,
    ) -> Result<Vec<Recommendation>> {
        options.weights.validate()?;

        let liked_books = self.resolve(liked);
        if liked_books.is_empty() {
            return Err(RecommendError::EmptyPreferences);
        }
        let liked_ids: HashSet<BookId> = liked_books.iter().map(|b| b.id).collect();

        let booster = FeatureBooster::new(
            LikedProfile::new(liked_books.iter().map(|b| b.as_ref())),
            options.boost,
        );
        let penalty = DislikePenalty::new(self.resolve(disliked), options.penalty_factor);
        let weights = &options.weights;

        let mut scored: Vec<Recommendation> = candidates
            .books()
            .par_iter()
            .filter(|book| !(options.exclude_liked && liked_ids.contains(&book.id)))
            .filter(|book| !penalty.excludes(book.id))
            .map(|book| {
                let similarities: Vec<f32> = liked_books
                    .iter()
                    .map(|liked| self.metric.similarity(book, liked, weights))
                    .collect();

                let mut score = options.strategy.reduce(&similarities);
                if options.strategy.boosts() {
                    score = booster.apply(book, score);
                }
                score = penalty.apply(&self.metric, book, score, weights);

                Recommendation {
                    book: Arc::clone(book),
                    score,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!("Scored {} candidates", scored.len());
        Ok(scored)
    }

    /// Top `options.limit` recommendations
    pub fn recommend(
        &self,
        candidates: &Catalog,
        liked: &[BookId],
        disliked: &[BookId],
        options: &ScoringOptions,
    ) -> Result<Vec<Recommendation>> {
        let mut ranked = self.score(candidates, liked, disliked, options)?;
        ranked.truncate(options.limit);
        Ok(ranked)
    }

    /// Explain a recommended book in terms of the liked books
    pub fn explain(&self, book: &Book, liked: &[BookId], weights: &Weights) -> Explanation {
        let liked_books = self.resolve(liked);

        let similar_to = liked_books
            .iter()
            .map(|liked| (liked, self.metric.similarity(book, liked, weights)))
            .fold(None::<(&Arc<Book>, f32)>, |best, (liked, sim)| match best {
                Some((_, best_sim)) if best_sim >= sim => best,
                _ => Some((liked, sim)),
            })
            .filter(|(_, sim)| *sim > SIMILARITY_THRESHOLD)
            .map(|(liked, sim)| (liked.title.clone(), sim));

        let mut shared_features = Vec::new();
        for liked in &liked_books {
            let shared = [
                (book.genre == liked.genre).then(|| format!("genre '{}'", liked.genre)),
                (book.author == liked.author).then(|| format!("author {}", liked.author)),
            ];
            for feature in shared.into_iter().flatten() {
                if !shared_features.contains(&feature) {
                    shared_features.push(feature);
                }
            }
        }

        Explanation {
            similar_to,
            shared_features,
        }
    }
}
