//! The FilterPipeline narrows a catalog through a chain of filters.

use crate::traits::BookFilter;
use data_loader::{Book, Catalog};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TextFilter::new(TextField::Genre, vec!["fantasy".into()]))
///     .add_filter(YearRangeFilter::new(Some(1950), None));
///
/// let narrowed = pipeline.apply(&catalog);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn BookFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl BookFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether a single book passes every filter
    pub fn matches(&self, book: &Book) -> bool {
        self.filters.iter().all(|filter| filter.matches(book))
    }

    /// Apply all filters in sequence, returning the narrowed catalog.
    ///
    /// Catalog order is preserved. An empty pipeline returns a copy of the
    /// input catalog.
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        let mut current = catalog.clone();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = current.filter(|book| filter.matches(book));
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{IllustrationsFilter, TextField, TextFilter};

    fn book(id: u32, genre: &str, illustrated: bool) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            language: "english".to_string(),
            genre: genre.to_string(),
            year: 2000,
            pages: 100,
            age_restriction: 6,
            has_illustrations: illustrated,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            book(1, "fantasy", true),
            book(2, "drama", true),
            book(3, "fantasy", false),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let filtered = pipeline.apply(&catalog());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new()
            .add_filter(TextFilter::new(TextField::Genre, vec!["Fantasy".to_string()]));

        let filtered = pipeline.apply(&catalog());
        assert_eq!(filtered.ids(), vec![1, 3]);
    }

    #[test]
    fn test_filters_compose() {
        let pipeline = FilterPipeline::new()
            .add_filter(TextFilter::new(TextField::Genre, vec!["fantasy".to_string()]))
            .add_filter(IllustrationsFilter::new(true));

        let catalog = catalog();
        let filtered = pipeline.apply(&catalog);
        assert_eq!(filtered.ids(), vec![1]);
        assert!(pipeline.matches(catalog.get_by_id(1).unwrap()));
        assert!(!pipeline.matches(catalog.get_by_id(3).unwrap()));
    }
}
