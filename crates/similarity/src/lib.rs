//! # Similarity Crate
//!
//! Hand-engineered book similarity.
//!
//! ## Components
//!
//! ### Taxonomy
//! Hierarchical genre distance over a fixed genre tree. Siblings are closer
//! than cousins; unknown genres are maximally distant.
//!
//! ### Scaler
//! Min-max normalization of numeric features, fitted per catalog snapshot.
//!
//! ### Composite Metric
//! Weighted sum of genre, categorical, binary and numeric sub-distances:
//! - `distance(a, b, weights)` / `similarity(a, b, weights)`
//! - `similar_books(catalog, position, n, weights)` nearest books by similarity
//! - `compare(a, b, weights)` readable differences and shared features
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{CompositeMetric, GenreTaxonomy, Weights};
//! use std::sync::Arc;
//!
//! let taxonomy = Arc::new(GenreTaxonomy::standard());
//! let metric = CompositeMetric::fit(&catalog, taxonomy);
//! let similar = metric.similar_books(&catalog, 0, 5, &Weights::default());
//! ```

pub mod error;
pub mod taxonomy;
pub mod scaler;
pub mod weights;
pub mod metric;
pub mod comparison;

pub use error::{Result, SimilarityError};
pub use taxonomy::{GenreNode, GenreTaxonomy};
pub use scaler::{MinMaxScaler, NumericFeature, ScalerSet};
pub use weights::Weights;
pub use metric::{CompositeMetric, DistanceBreakdown};
pub use comparison::BookComparison;
