//! Named policies for turning several liked books into one score.

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Mean similarity to the liked books
    Average,
    /// Highest similarity to any liked book
    Union,
    /// Average, then the common-feature boost
    ContentBoost,
    /// Average, then the common-feature boost. Same scores as `ContentBoost`.
    #[default]
    Combined,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Average,
        Strategy::Union,
        Strategy::ContentBoost,
        Strategy::Combined,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Average => "average",
            Strategy::Union => "union",
            Strategy::ContentBoost => "content_boost",
            Strategy::Combined => "combined",
        }
    }

    /// Whether scores go through the common-feature booster
    pub fn boosts(self) -> bool {
        matches!(self, Strategy::ContentBoost | Strategy::Combined)
    }

    /// Reduce the similarities of one candidate to every liked book.
    /// `similarities` must not be empty.
    pub fn reduce(self, similarities: &[f32]) -> f32 {
        match self {
            Strategy::Union => similarities
                .iter()
                .copied()
                .fold(f32::NEG_INFINITY, f32::max),
            Strategy::Average | Strategy::ContentBoost | Strategy::Combined => {
                similarities.iter().sum::<f32>() / similarities.len() as f32
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| RecommendError::UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("average".parse::<Strategy>().unwrap(), Strategy::Average);
        assert_eq!("Content-Boost".parse::<Strategy>().unwrap(), Strategy::ContentBoost);
        assert!("best".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Combined);
    }

    #[test]
    fn test_reduce() {
        let sims = [0.2, 0.8, -0.1];
        assert!((Strategy::Average.reduce(&sims) - 0.3).abs() < 1e-6);
        assert_eq!(Strategy::Union.reduce(&sims), 0.8);
        // No zero floor: a lone negative similarity stays negative
        assert_eq!(Strategy::Union.reduce(&[-0.4]), -0.4);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Strategy::ContentBoost).unwrap();
        assert_eq!(json, "\"content_boost\"");
    }
}
