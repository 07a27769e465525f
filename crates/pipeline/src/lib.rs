//! Catalog filtering and preference aggregation for book recommendations.
//!
//! This crate provides:
//! - BookFilter trait and implementations for narrowing a catalog
//! - FilterCriteria, the accumulated filters of a conversation, and the
//!   FilterPipeline built from them
//! - PreferenceAggregator, which ranks candidates against liked and
//!   disliked books
//!
//! ## Architecture
//! Scoring runs in stages:
//! 1. Filters narrow the full catalog to the active candidates
//! 2. The strategy reduces each candidate's similarity to the liked books
//! 3. Boosting strategies reward the dominant liked genre and author
//! 4. The dislike penalty removes disliked books and demotes look-alikes
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterCriteria, PreferenceAggregator, ScoringOptions};
//!
//! let criteria = FilterCriteria { genre: vec!["fantasy".into()], ..Default::default() };
//! let candidates = criteria.apply(&full);
//!
//! let aggregator = PreferenceAggregator::new(full.clone(), taxonomy);
//! let top = aggregator.recommend(&candidates, &liked, &disliked, &ScoringOptions::default())?;
//! ```

pub mod error;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod criteria;
pub mod strategy;
pub mod booster;
pub mod penalty;
pub mod aggregator;

// Re-export main types
pub use error::{RecommendError, Result};
pub use traits::BookFilter;
pub use filter_pipeline::FilterPipeline;
pub use criteria::FilterCriteria;
pub use strategy::Strategy;
pub use booster::{BoostFactors, FeatureBooster, LikedProfile};
pub use penalty::{DislikePenalty, DEFAULT_PENALTY_FACTOR};
pub use aggregator::{
    Explanation, PreferenceAggregator, Recommendation, ScoringOptions, DEFAULT_LIMIT,
    SIMILARITY_THRESHOLD,
};
