//! Core domain types for the book catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `Book`: one immutable catalog entry
//! - `Catalog`: an ordered, read-only snapshot of books with a position index
//!
//! Books are shared between catalog snapshots through `Arc`, so narrowing a
//! catalog by filters never copies the records themselves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a book within a catalog snapshot
pub type BookId = u32;

// =============================================================================
// Book
// =============================================================================

/// Represents a book in the catalog.
///
/// The genre is a single label. Labels known to the genre taxonomy get a
/// hierarchical distance, anything else is treated as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub language: String,
    pub genre: String,
    pub year: i32,
    pub pages: u32,
    pub age_restriction: u32,
    pub has_illustrations: bool,
}

impl Book {
    /// Short human-readable label: `"Title" - Author`
    pub fn label(&self) -> String {
        format!("\"{}\" - {}", self.title, self.author)
    }
}

// =============================================================================
// Catalog - The Read-Only Candidate View
// =============================================================================

/// Ordered, immutable snapshot of books.
///
/// A catalog is built once (and validated) from loaded data, then narrowed with
/// [`Catalog::subset`] or [`Catalog::filter`] whenever the active filters
/// change. Each book keeps an integer position within its snapshot; positions
/// are snapshot-local while ids are stable across snapshots.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) books: Vec<Arc<Book>>,
    /// Position of each book id within `books`
    pub(crate) positions: HashMap<BookId, usize>,
}

impl Catalog {
    /// Number of books in this snapshot
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// All books in catalog order
    pub fn books(&self) -> &[Arc<Book>] {
        &self.books
    }

    /// Iterate over the books in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().map(|b| b.as_ref())
    }

    /// Get a book by its position in this snapshot
    pub fn get(&self, position: usize) -> Option<&Book> {
        self.books.get(position).map(|b| b.as_ref())
    }

    /// Get a book by id
    pub fn get_by_id(&self, id: BookId) -> Option<&Book> {
        self.position_of(id).and_then(|pos| self.get(pos))
    }

    /// Position of a book id in this snapshot, if present
    pub fn position_of(&self, id: BookId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn contains_id(&self, id: BookId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Ids of all books, in catalog order
    pub fn ids(&self) -> Vec<BookId> {
        self.books.iter().map(|b| b.id).collect()
    }

    /// Build a catalog from books that were already validated as part of
    /// another catalog. Order is preserved.
    pub fn subset(books: Vec<Arc<Book>>) -> Self {
        let positions = books
            .iter()
            .enumerate()
            .map(|(pos, book)| (book.id, pos))
            .collect();
        Self { books, positions }
    }
}
