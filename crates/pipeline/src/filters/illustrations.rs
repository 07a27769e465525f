use crate::traits::BookFilter;
use data_loader::Book;

/// Keeps books with (or without) illustrations
pub struct IllustrationsFilter {
    required: bool,
}

impl IllustrationsFilter {
    pub fn new(required: bool) -> Self {
        Self { required }
    }
}

impl BookFilter for IllustrationsFilter {
    fn name(&self) -> &str {
        "IllustrationsFilter"
    }

    fn matches(&self, book: &Book) -> bool {
        book.has_illustrations == self.required
    }
}
