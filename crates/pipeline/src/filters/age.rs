//! Filter on the age restriction label.

use crate::traits::BookFilter;
use data_loader::Book;

/// Keeps books whose age restriction is one of the accepted values.
/// An empty list accepts every book.
pub struct AgeRestrictionFilter {
    accepted: Vec<u32>,
}

impl AgeRestrictionFilter {
    pub fn new(accepted: Vec<u32>) -> Self {
        Self { accepted }
    }
}

impl BookFilter for AgeRestrictionFilter {
    fn name(&self) -> &str {
        "AgeRestrictionFilter"
    }

    fn matches(&self, book: &Book) -> bool {
        self.accepted.is_empty() || self.accepted.contains(&book.age_restriction)
    }
}
