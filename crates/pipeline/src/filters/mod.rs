//! Filter implementations for the catalog pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod text;
pub mod age;
pub mod range;
pub mod illustrations;

// Re-export for convenience
pub use text::{TextField, TextFilter};
pub use age::AgeRestrictionFilter;
pub use range::{PagesRangeFilter, YearRangeFilter};
pub use illustrations::IllustrationsFilter;
