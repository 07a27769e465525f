//! Sub-distance weights for the composite metric.

use crate::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};

/// Weight of each sub-distance.
///
/// Weights need not sum to 1. The composite distance is a plain weighted sum,
/// so scaling every weight scales the distance by the same factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub genre: f32,
    pub author: f32,
    pub publisher: f32,
    pub language: f32,
    pub has_illustrations: f32,
    /// Weight of the combined normalized year + pages difference
    pub numerical: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            genre: 0.35,
            author: 0.2,
            publisher: 0.05,
            language: 0.05,
            has_illustrations: 0.15,
            numerical: 0.2,
        }
    }
}

impl Weights {
    /// Sum of all weights, the largest distance two books can reach when
    /// their numeric difference stays within 1.
    pub fn total(&self) -> f32 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    /// Reject negative and non-finite weights
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(SimilarityError::InvalidWeight {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    fn entries(&self) -> [(&'static str, f32); 6] {
        [
            ("genre", self.genre),
            ("author", self.author),
            ("publisher", self.publisher),
            ("language", self.language),
            ("has_illustrations", self.has_illustrations),
            ("numerical", self.numerical),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let weights = Weights::default();
        assert!((weights.total() - 1.0).abs() < 1e-6);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let weights: Weights = serde_json::from_str(r#"{"genre": 0.9}"#).unwrap();
        assert_eq!(weights.genre, 0.9);
        assert_eq!(weights.author, 0.2);
        assert_eq!(weights.numerical, 0.2);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = Weights {
            publisher: -0.1,
            ..Weights::default()
        };
        match weights.validate() {
            Err(SimilarityError::InvalidWeight { name, .. }) => assert_eq!(name, "publisher"),
            other => panic!("expected InvalidWeight, got {:?}", other),
        }
    }
}
