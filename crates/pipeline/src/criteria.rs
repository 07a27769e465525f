//! Accumulated catalog filters.
//!
//! List keys collect every accepted value seen so far; scalar keys keep the
//! most recent bound. `merge` layers a newer set of criteria on top of an
//! older one without mutating either.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    AgeRestrictionFilter, IllustrationsFilter, PagesRangeFilter, TextField, TextFilter,
    YearRangeFilter,
};
use data_loader::{Book, Catalog};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub author: Vec<String>,
    pub publisher: Vec<String>,
    pub language: Vec<String>,
    pub genre: Vec<String>,
    pub age_restriction: Vec<u32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub pages_from: Option<u32>,
    pub pages_to: Option<u32>,
    pub has_illustrations: Option<bool>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `newer` on top of these criteria.
    ///
    /// List values are unioned: existing entries keep their position and new
    /// ones are appended once. Scalar values are replaced when `newer` sets them.
    pub fn merge(&self, newer: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            author: union(&self.author, &newer.author),
            publisher: union(&self.publisher, &newer.publisher),
            language: union(&self.language, &newer.language),
            genre: union(&self.genre, &newer.genre),
            age_restriction: union(&self.age_restriction, &newer.age_restriction),
            year_from: newer.year_from.or(self.year_from),
            year_to: newer.year_to.or(self.year_to),
            pages_from: newer.pages_from.or(self.pages_from),
            pages_to: newer.pages_to.or(self.pages_to),
            has_illustrations: newer.has_illustrations.or(self.has_illustrations),
        }
    }

    /// Build the filter pipeline for these criteria. Keys without a value add
    /// no filter.
    pub fn to_pipeline(&self) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();

        let text_keys = [
            (TextField::Author, &self.author),
            (TextField::Publisher, &self.publisher),
            (TextField::Language, &self.language),
            (TextField::Genre, &self.genre),
        ];
        for (field, values) in text_keys {
            if !values.is_empty() {
                pipeline = pipeline.add_filter(TextFilter::new(field, values.clone()));
            }
        }
        if !self.age_restriction.is_empty() {
            pipeline = pipeline.add_filter(AgeRestrictionFilter::new(self.age_restriction.clone()));
        }
        if self.year_from.is_some() || self.year_to.is_some() {
            pipeline = pipeline.add_filter(YearRangeFilter::new(self.year_from, self.year_to));
        }
        if self.pages_from.is_some() || self.pages_to.is_some() {
            pipeline = pipeline.add_filter(PagesRangeFilter::new(self.pages_from, self.pages_to));
        }
        if let Some(required) = self.has_illustrations {
            pipeline = pipeline.add_filter(IllustrationsFilter::new(required));
        }

        pipeline
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.to_pipeline().matches(book)
    }

    /// Narrow `catalog` to the books matching these criteria
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        self.to_pipeline().apply(catalog)
    }
}

fn union<T: Clone + PartialEq>(older: &[T], newer: &[T]) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(older.len() + newer.len());
    for value in older.iter().chain(newer) {
        if !merged.contains(value) {
            merged.push(value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: u32, genre: &str, year: i32, age: u32) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            language: "russian".to_string(),
            genre: genre.to_string(),
            year,
            pages: 200,
            age_restriction: age,
            has_illustrations: false,
        }
    }

    fn genres(values: &[&str]) -> FilterCriteria {
        FilterCriteria {
            genre: values.iter().map(|v| v.to_string()).collect(),
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn test_merge_unions_lists_in_order() {
        let merged = genres(&["fantasy", "drama"]).merge(&genres(&["poetry", "fantasy"]));
        assert_eq!(merged.genre, vec!["fantasy", "drama", "poetry"]);
    }

    #[test]
    fn test_merge_overwrites_scalars_only_when_set() {
        let older = FilterCriteria {
            year_from: Some(1900),
            year_to: Some(2000),
            ..FilterCriteria::default()
        };
        let newer = FilterCriteria {
            year_to: Some(1950),
            ..FilterCriteria::default()
        };
        let merged = older.merge(&newer);
        assert_eq!(merged.year_from, Some(1900));
        assert_eq!(merged.year_to, Some(1950));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = FilterCriteria::default().merge(&genres(&["fantasy"]));
        let twice = once.merge(&genres(&["fantasy"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply() {
        let catalog = Catalog::new(vec![
            book(1, "fantasy", 1937, 6),
            book(2, "fantasy", 2001, 16),
            book(3, "drama", 1950, 6),
        ])
        .unwrap();

        let criteria = FilterCriteria {
            genre: vec!["Fantasy".to_string()],
            age_restriction: vec![6],
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.apply(&catalog).ids(), vec![1]);

        let criteria = FilterCriteria {
            year_from: Some(1940),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.apply(&catalog).ids(), vec![2, 3]);
        assert!(criteria.matches(catalog.get_by_id(3).unwrap()));
    }

    #[test]
    fn test_empty_criteria_keep_everything() {
        let catalog = Catalog::new(vec![book(1, "fantasy", 1937, 6)]).unwrap();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.to_pipeline().is_empty());
        assert_eq!(criteria.apply(&catalog).len(), 1);
    }

    #[test]
    fn test_partial_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"genre": ["fantasy"], "year_from": 1950}"#).unwrap();
        assert_eq!(criteria.genre, vec!["fantasy"]);
        assert_eq!(criteria.year_from, Some(1950));
        assert!(criteria.author.is_empty());
    }
}
