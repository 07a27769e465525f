//! Side-by-side comparison of two books.

use crate::metric::CompositeMetric;
use crate::weights::Weights;
use data_loader::Book;
use serde::Serialize;

/// Year gap above which two books count as from different periods
pub const YEAR_GAP: u32 = 10;
/// Page gap above which two books count as different in length
pub const PAGES_GAP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookComparison {
    pub similarity: f32,
    pub differences: Vec<String>,
    pub common_features: Vec<String>,
}

impl CompositeMetric {
    /// Describe what two books share and where they differ
    pub fn compare(&self, a: &Book, b: &Book, weights: &Weights) -> BookComparison {
        let mut differences = Vec::new();
        let mut common_features = Vec::new();

        if a.genre == b.genre {
            common_features.push(format!("genre: {}", a.genre));
        } else {
            differences.push(format!(
                "genre: {} vs {} (distance {:.2})",
                a.genre,
                b.genre,
                self.genre_distance(a, b)
            ));
        }

        if a.author == b.author {
            common_features.push(format!("author: {}", a.author));
        } else {
            differences.push(format!("author: {} vs {}", a.author, b.author));
        }

        if a.publisher == b.publisher {
            common_features.push(format!("publisher: {}", a.publisher));
        }
        if a.language == b.language {
            common_features.push(format!("language: {}", a.language));
        }
        if a.has_illustrations == b.has_illustrations {
            let label = if a.has_illustrations {
                "illustrated"
            } else {
                "not illustrated"
            };
            common_features.push(label.to_string());
        }

        if a.year.abs_diff(b.year) > YEAR_GAP {
            differences.push(format!("year: {} vs {}", a.year, b.year));
        }
        if a.pages.abs_diff(b.pages) > PAGES_GAP {
            differences.push(format!("pages: {} vs {}", a.pages, b.pages));
        }

        BookComparison {
            similarity: self.similarity(a, b, weights),
            differences,
            common_features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::GenreTaxonomy;
    use data_loader::Catalog;
    use std::sync::Arc;

    fn book(id: u32, genre: &str, author: &str, year: i32, pages: u32) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: author.to_string(),
            publisher: "Publisher".to_string(),
            language: "english".to_string(),
            genre: genre.to_string(),
            year,
            pages,
            age_restriction: 12,
            has_illustrations: true,
        }
    }

    #[test]
    fn test_compare() {
        let a = book(1, "fantasy", "Tolkien", 1937, 310);
        let b = book(2, "dystopia", "Tolkien", 1960, 320);
        let catalog = Catalog::new(vec![a.clone(), b.clone()]).unwrap();
        let metric = CompositeMetric::fit(&catalog, Arc::new(GenreTaxonomy::standard()));

        let cmp = metric.compare(&a, &b, &Weights::default());
        assert!(cmp.common_features.contains(&"author: Tolkien".to_string()));
        assert!(cmp.common_features.contains(&"illustrated".to_string()));
        assert!(cmp.differences.iter().any(|d| d.starts_with("genre: fantasy vs dystopia")));
        assert!(cmp.differences.contains(&"year: 1937 vs 1960".to_string()));
        assert!(!cmp.differences.iter().any(|d| d.starts_with("pages")));
        assert_eq!(cmp.similarity, metric.similarity(&a, &b, &Weights::default()));
    }

    #[test]
    fn test_compare_extreme_years() {
        let a = book(1, "fantasy", "A", i32::MIN, 100);
        let b = book(2, "fantasy", "A", i32::MAX, 100);
        let catalog = Catalog::new(vec![a.clone(), b.clone()]).unwrap();
        let metric = CompositeMetric::fit(&catalog, Arc::new(GenreTaxonomy::standard()));

        let cmp = metric.compare(&a, &b, &Weights::default());
        assert!(cmp.differences.iter().any(|d| d.starts_with("year:")));
    }
}
