//! Filter on a categorical text field of a book.

use crate::traits::BookFilter;
use data_loader::Book;

/// Text fields a list filter can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Author,
    Publisher,
    Language,
    Genre,
}

impl TextField {
    pub fn value(self, book: &Book) -> &str {
        match self {
            TextField::Author => &book.author,
            TextField::Publisher => &book.publisher,
            TextField::Language => &book.language,
            TextField::Genre => &book.genre,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextField::Author => "author",
            TextField::Publisher => "publisher",
            TextField::Language => "language",
            TextField::Genre => "genre",
        }
    }
}

/// Keeps books whose field equals one of the accepted values.
///
/// Comparison is case-insensitive. An empty list accepts every book.
pub struct TextFilter {
    field: TextField,
    accepted: Vec<String>,
    name: String,
}

impl TextFilter {
    pub fn new(field: TextField, accepted: Vec<String>) -> Self {
        Self {
            field,
            accepted: accepted.iter().map(|v| v.trim().to_lowercase()).collect(),
            name: format!("TextFilter({})", field.name()),
        }
    }
}

impl BookFilter for TextFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, book: &Book) -> bool {
        if self.accepted.is_empty() {
            return true;
        }
        let value = self.field.value(book).trim().to_lowercase();
        self.accepted.contains(&value)
    }
}
