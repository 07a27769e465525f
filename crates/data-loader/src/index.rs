//! Catalog building, validation and lookups.
//!
//! A catalog is validated once when it is built from loaded books. Every
//! narrower snapshot is derived from a validated catalog and skips validation.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

impl Catalog {
    /// Build and validate a catalog from books in their catalog order.
    pub fn new(books: Vec<Book>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(books.len());
        for (pos, book) in books.iter().enumerate() {
            if positions.insert(book.id, pos).is_some() {
                return Err(DataLoadError::DuplicateId(book.id));
            }
        }

        let catalog = Self {
            books: books.into_iter().map(Arc::new).collect(),
            positions,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog CSV file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading book catalog from {:?}", path);
        let books = parser::parse_books(path)?;
        let catalog = Self::new(books)?;
        info!("Loaded {} books", catalog.len());
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every book has a non-empty title
    /// - Page counts are positive
    pub fn validate(&self) -> Result<()> {
        for book in self.iter() {
            if book.title.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "book {} has an empty title",
                    book.id
                )));
            }
            if book.pages == 0 {
                return Err(DataLoadError::InvalidValue {
                    field: "pages".to_string(),
                    value: format!("0 (book {})", book.id),
                });
            }
        }
        Ok(())
    }

    /// Narrow this catalog to the books matching `predicate`, keeping order.
    pub fn filter<F>(&self, predicate: F) -> Catalog
    where
        F: Fn(&Book) -> bool + Sync,
    {
        let books: Vec<Arc<Book>> = self
            .books
            .par_iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect();
        debug!("Filtered catalog: {} -> {} books", self.len(), books.len());
        Catalog::subset(books)
    }

    /// Books whose title matches `title` case-insensitively.
    ///
    /// Exact matches come first, then titles containing `title`, each group
    /// in catalog order. A blank query matches nothing.
    pub fn search(&self, title: &str) -> Vec<&Book> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let (exact, partial): (Vec<&Book>, Vec<&Book>) = self
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .partition(|book| book.title.to_lowercase() == needle);
        exact.into_iter().chain(partial).collect()
    }

    /// Find a book by title: the best match of [`search`](Self::search)
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.search(title).into_iter().next()
    }

    /// Resolve titles to ids, dropping the ones that match no book.
    ///
    /// Returns the resolved ids (in input order, deduplicated) and the titles
    /// that could not be resolved.
    pub fn resolve_titles<S: AsRef<str>>(&self, titles: &[S]) -> (Vec<BookId>, Vec<String>) {
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for title in titles {
            match self.find_by_title(title.as_ref()) {
                Some(book) if !resolved.contains(&book.id) => resolved.push(book.id),
                Some(_) => {}
                None => unresolved.push(title.as_ref().to_string()),
            }
        }
        if !unresolved.is_empty() {
            debug!("Unresolved titles: {:?}", unresolved);
        }
        (resolved, unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: BookId, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            language: "english".to_string(),
            genre: "novel".to_string(),
            year: 2000,
            pages: 100,
            age_restriction: 12,
            has_illustrations: false,
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![book(1, "A"), book(1, "B")]);
        assert!(matches!(result, Err(DataLoadError::DuplicateId(1))));
    }

    #[test]
    fn test_zero_pages_rejected() {
        let mut bad = book(1, "A");
        bad.pages = 0;
        assert!(Catalog::new(vec![bad]).is_err());
    }

    #[test]
    fn test_find_by_title_prefers_exact_match() {
        let catalog = Catalog::new(vec![
            book(1, "The Hobbit Companion"),
            book(2, "The Hobbit"),
        ])
        .unwrap();

        assert_eq!(catalog.find_by_title("the hobbit").unwrap().id, 2);
        assert_eq!(catalog.find_by_title("companion").unwrap().id, 1);
        assert!(catalog.find_by_title("Dune").is_none());
        assert!(catalog.find_by_title("  ").is_none());
    }

    #[test]
    fn test_resolve_titles_drops_unknown() {
        let catalog = Catalog::new(vec![book(1, "Dune"), book(2, "Emma")]).unwrap();
        let (ids, missing) = catalog.resolve_titles(&["emma", "Ulysses", "Emma"]);
        assert_eq!(ids, vec![2]);
        assert_eq!(missing, vec!["Ulysses".to_string()]);
    }

    #[test]
    fn test_filter_keeps_order_and_positions() {
        let catalog =
            Catalog::new(vec![book(10, "A"), book(20, "B"), book(30, "C")]).unwrap();
        let narrowed = catalog.filter(|b| b.id != 20);

        assert_eq!(narrowed.ids(), vec![10, 30]);
        assert_eq!(narrowed.position_of(30), Some(1));
        assert!(!narrowed.contains_id(20));
        assert_eq!(narrowed.get_by_id(10).unwrap().title, "A");
    }

    #[test]
    fn test_search_ranks_exact_before_partial() {
        let catalog = Catalog::new(vec![
            book(1, "Dune Messiah"),
            book(2, "Emma"),
            book(3, "dune"),
            book(4, "Children of Dune"),
        ])
        .unwrap();

        let ids: Vec<BookId> = catalog.search("Dune").iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1, 4]);
        assert_eq!(catalog.find_by_title("Dune").unwrap().id, 3);
        assert!(catalog.search("Ulysses").is_empty());
        assert!(catalog.search(" ").is_empty());
    }
}
