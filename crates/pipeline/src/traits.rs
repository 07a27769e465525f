//! Core traits for the catalog filter pipeline.
//!
//! A filter is a predicate over one book. The pipeline narrows a catalog by
//! running each filter in turn, so filters can stay stateless and composable.

use data_loader::Book;

/// Core trait for filtering books.
///
/// All filters must implement this trait to be used in the FilterPipeline.
/// `Send + Sync` lets the pipeline evaluate a filter across books in parallel.
pub trait BookFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `book` passes this filter
    fn matches(&self, book: &Book) -> bool;
}
