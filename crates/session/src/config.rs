//! Recommender configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "strategy": "union", "weights": { "genre": 0.5 }, "n_recommendations": 10 }
//! ```

use crate::error::{Result, SessionError};
use pipeline::{BoostFactors, ScoringOptions, Strategy, DEFAULT_LIMIT, DEFAULT_PENALTY_FACTOR};
use serde::{Deserialize, Serialize};
use similarity::Weights;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default number of undo snapshots kept per session
pub const MAX_HISTORY_STEPS: usize = 5;

/// Default cap on the number of books listed for a filter-only request
pub const MAX_RESULTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub weights: Weights,
    pub strategy: Strategy,
    pub penalty_factor: f32,
    pub n_recommendations: usize,
    pub exclude_liked: bool,
    pub boost: BoostFactors,
    pub max_history: usize,
    pub max_results: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            strategy: Strategy::default(),
            penalty_factor: DEFAULT_PENALTY_FACTOR,
            n_recommendations: DEFAULT_LIMIT,
            exclude_liked: true,
            boost: BoostFactors::default(),
            max_history: MAX_HISTORY_STEPS,
            max_results: MAX_RESULTS,
        }
    }
}

impl RecommenderConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SessionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        info!("Loaded recommender config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.penalty_factor) {
            return Err(SessionError::InvalidConfig(format!(
                "penalty_factor must be within [0, 1], got {}",
                self.penalty_factor
            )));
        }
        if self.max_history == 0 {
            return Err(SessionError::InvalidConfig(
                "max_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Scoring options for the aggregator
    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            strategy: self.strategy,
            penalty_factor: self.penalty_factor,
            weights: self.weights,
            boost: self.boost,
            exclude_liked: self.exclude_liked,
            limit: self.n_recommendations,
        }
    }
}
