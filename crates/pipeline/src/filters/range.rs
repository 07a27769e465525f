//! Inclusive range filters on year and page count.

use crate::traits::BookFilter;
use data_loader::Book;

fn within<T: PartialOrd>(value: T, from: Option<T>, to: Option<T>) -> bool {
    from.is_none_or(|from| value >= from) && to.is_none_or(|to| value <= to)
}

/// Keeps books published within `[from, to]`. A missing bound is open.
pub struct YearRangeFilter {
    from: Option<i32>,
    to: Option<i32>,
}

impl YearRangeFilter {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }
}

impl BookFilter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn matches(&self, book: &Book) -> bool {
        within(book.year, self.from, self.to)
    }
}

/// Keeps books whose page count lies within `[from, to]`
pub struct PagesRangeFilter {
    from: Option<u32>,
    to: Option<u32>,
}

impl PagesRangeFilter {
    pub fn new(from: Option<u32>, to: Option<u32>) -> Self {
        Self { from, to }
    }
}

impl BookFilter for PagesRangeFilter {
    fn name(&self) -> &str {
        "PagesRangeFilter"
    }

    fn matches(&self, book: &Book) -> bool {
        within(book.pages, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(year: i32, pages: u32) -> Book {
        Book {
            id: 1,
            title: "T".to_string(),
            author: "A".to_string(),
            publisher: "P".to_string(),
            language: "english".to_string(),
            genre: "novel".to_string(),
            year,
            pages,
            age_restriction: 0,
            has_illustrations: false,
        }
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let filter = YearRangeFilter::new(Some(1900), Some(1950));
        assert!(filter.matches(&book(1900, 10)));
        assert!(filter.matches(&book(1950, 10)));
        assert!(!filter.matches(&book(1951, 10)));
        assert!(!filter.matches(&book(1899, 10)));
    }

    #[test]
    fn test_open_bounds() {
        let at_least = PagesRangeFilter::new(Some(300), None);
        assert!(at_least.matches(&book(2000, 1200)));
        assert!(!at_least.matches(&book(2000, 299)));

        let open = YearRangeFilter::new(None, None);
        assert!(open.matches(&book(-500, 1)));
    }
}
