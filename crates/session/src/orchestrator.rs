//! # Recommendation Session
//!
//! Coordinates one conversation:
//! 1. Interpret the parsed intent (layer, step back or start over)
//! 2. Resolve liked/disliked titles against the full catalog
//! 3. Update the preference store
//! 4. With likes: score the active candidates and explain the top picks
//! 5. Without likes: list the active candidates
//!
//! The full catalog and the aggregator are shared read-only between sessions;
//! each session owns its preference store.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use data_loader::{Book, BookId, Catalog};
use pipeline::{Explanation, PreferenceAggregator, ScoringOptions};
use similarity::{CompositeMetric, GenreTaxonomy};

use crate::config::RecommenderConfig;
use crate::error::{Result, SessionError};
use crate::intent::{Intent, IntentAction};
use crate::state::{PreferenceState, PreferenceUpdate};
use crate::store::{PreferenceStateStore, StepBack};

/// What a handled intent did to the preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Layered,
    SteppedBack,
    NothingToUndo,
    Reset,
}

/// A recommendation ready for rendering
#[derive(Debug, Clone)]
pub struct BookRecommendation {
    pub book: Arc<Book>,
    pub score: f32,
    pub explanation: Explanation,
}

/// Everything a presentation layer needs after one intent
#[derive(Debug, Clone)]
pub struct SessionResponse {
    pub action: SessionAction,
    /// Snapshot of the preferences after the intent
    pub state: PreferenceState,
    /// Ranked recommendations; empty when no likes are set
    pub recommendations: Vec<BookRecommendation>,
    /// Active candidates, capped at `max_results`; empty when recommending
    pub listing: Vec<Arc<Book>>,
    /// Liked/disliked titles that matched no book and were dropped
    pub unresolved: Vec<String>,
}

pub struct RecommendationSession {
    aggregator: Arc<PreferenceAggregator>,
    store: PreferenceStateStore,
    options: ScoringOptions,
    max_results: usize,
}

impl RecommendationSession {
    /// Start a session over the aggregator's full catalog
    pub fn new(aggregator: Arc<PreferenceAggregator>, config: &RecommenderConfig) -> Self {
        let store = PreferenceStateStore::new(Arc::clone(aggregator.full_catalog()))
            .with_max_history(config.max_history);
        Self {
            aggregator,
            store,
            options: config.scoring_options(),
            max_results: config.max_results,
        }
    }

    /// Build a standalone session, with its own aggregator
    pub fn from_catalog(
        full: Arc<Catalog>,
        taxonomy: Arc<GenreTaxonomy>,
        config: &RecommenderConfig,
    ) -> Self {
        let aggregator = Arc::new(PreferenceAggregator::new(full, taxonomy));
        Self::new(aggregator, config)
    }

    pub fn store(&self) -> &PreferenceStateStore {
        &self.store
    }

    pub fn current(&self) -> &PreferenceState {
        self.store.current()
    }

    pub fn options(&self) -> &ScoringOptions {
        &self.options
    }

    pub fn full_catalog(&self) -> &Arc<Catalog> {
        self.aggregator.full_catalog()
    }

    /// Main entry point: apply one parsed intent and build the response
    #[instrument(skip_all)]
    pub fn handle(&mut self, intent: &Intent) -> Result<SessionResponse> {
        let start_time = Instant::now();

        let mut unresolved = Vec::new();
        let action = match intent.action() {
            IntentAction::StartOver => {
                self.store.reset();
                SessionAction::Reset
            }
            IntentAction::StepBack => match self.store.step_back() {
                StepBack::Undone => SessionAction::SteppedBack,
                StepBack::NothingToUndo => SessionAction::NothingToUndo,
            },
            IntentAction::Layer => {
                unresolved = self.apply(intent.to_update());
                SessionAction::Layered
            }
        };

        let response = self.respond(action, unresolved)?;
        info!(
            "Handled {:?}: {} recommendations, {} listed in {:.2?}",
            response.action,
            response.recommendations.len(),
            response.listing.len(),
            start_time.elapsed()
        );
        Ok(response)
    }

    /// Layer an update directly, bypassing intent parsing
    pub fn layer(&mut self, update: PreferenceUpdate) -> Result<SessionResponse> {
        let unresolved = self.apply(update);
        self.respond(SessionAction::Layered, unresolved)
    }

    /// Recommendations for the current preferences
    pub fn recommend(&self) -> Result<Vec<BookRecommendation>> {
        let state = self.store.current();
        let liked = self.title_ids(&state.likes);
        let disliked = self.title_ids(&state.dislikes);

        let ranked = self
            .aggregator
            .recommend(&state.candidates, &liked, &disliked, &self.options)?;

        Ok(ranked
            .into_iter()
            .map(|rec| BookRecommendation {
                explanation: self
                    .aggregator
                    .explain(&rec.book, &liked, &self.options.weights),
                book: rec.book,
                score: rec.score,
            })
            .collect())
    }

    /// Books most similar to `title` among the active candidates.
    ///
    /// Similarity here uses the scalers fitted on the active candidates, so
    /// numeric differences are relative to the filtered set.
    pub fn similar(&self, title: &str, n: usize) -> Result<Vec<(Arc<Book>, f32)>> {
        let state = self.store.current();
        let target = state
            .candidates
            .find_by_title(title)
            .ok_or_else(|| SessionError::BookNotFound(title.to_string()))?;

        let metric = CompositeMetric::new(
            Arc::clone(self.aggregator.metric().taxonomy()),
            state.scalers.clone(),
        );
        Ok(metric.similar_to(&state.candidates, target.id, n, &self.options.weights)?)
    }

    /// Resolve feedback titles to catalog titles, then layer the update.
    /// Returns the titles that matched no book.
    fn apply(&mut self, mut update: PreferenceUpdate) -> Vec<String> {
        let full = Arc::clone(self.aggregator.full_catalog());
        let mut unresolved = Vec::new();

        for titles in [&mut update.likes, &mut update.dislikes] {
            let (ids, missing) = full.resolve_titles(titles.as_slice());
            *titles = ids
                .into_iter()
                .filter_map(|id| full.get_by_id(id).map(|book| book.title.clone()))
                .collect();
            unresolved.extend(missing);
        }

        self.store.layer(&update);
        unresolved
    }

    fn title_ids(&self, titles: &[String]) -> Vec<BookId> {
        self.aggregator.full_catalog().resolve_titles(titles).0
    }

    fn respond(&self, action: SessionAction, unresolved: Vec<String>) -> Result<SessionResponse> {
        let state = self.store.current().clone();

        let (recommendations, listing) = if state.has_likes() {
            (self.recommend()?, Vec::new())
        } else {
            debug!("No likes yet, listing {} candidates", state.candidates.len());
            let listing = state
                .candidate_books()
                .iter()
                .take(self.max_results)
                .cloned()
                .collect();
            (Vec::new(), listing)
        };

        Ok(SessionResponse {
            action,
            state,
            recommendations,
            listing,
            unresolved,
        })
    }
}
