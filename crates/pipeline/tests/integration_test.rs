//! Integration tests for the pipeline.
//!
//! These tests verify that filtering and preference aggregation work together
//! in realistic scenarios.

use data_loader::{Book, BookId, Catalog};
use pipeline::{
    FilterCriteria, PreferenceAggregator, RecommendError, ScoringOptions, Strategy,
};
use similarity::GenreTaxonomy;
use std::collections::HashMap;
use std::sync::Arc;

fn book(id: BookId, title: &str, genre: &str, author: &str, year: i32, pages: u32) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        publisher: "Publisher".to_string(),
        language: "english".to_string(),
        genre: genre.to_string(),
        year,
        pages,
        age_restriction: 12,
        has_illustrations: false,
    }
}

fn aggregator_for(books: Vec<Book>) -> PreferenceAggregator {
    let catalog = Catalog::new(books).unwrap();
    PreferenceAggregator::new(Arc::new(catalog), Arc::new(GenreTaxonomy::standard()))
}

fn create_test_setup() -> PreferenceAggregator {
    aggregator_for(vec![
        book(1, "The Hobbit", "fantasy", "Tolkien", 1937, 310),
        book(2, "The Silmarillion", "fantasy", "Tolkien", 1977, 365),
        book(3, "A Wizard of Earthsea", "fantasy", "Le Guin", 1968, 183),
        book(4, "1984", "dystopia", "Orwell", 1949, 328),
        book(5, "The Cherry Orchard", "drama", "Chekhov", 1904, 96),
        book(6, "Emma", "romance", "Austen", 1815, 474),
        book(7, "Brave New World", "dystopia", "Huxley", 1932, 311),
    ])
}

#[test]
fn test_same_genre_ranks_above_other_genre() {
    // A and B share a genre, C does not
    let aggregator = aggregator_for(vec![
        book(1, "A", "fantasy", "X", 2000, 200),
        book(2, "B", "fantasy", "Y", 2000, 200),
        book(3, "C", "drama", "Z", 2000, 200),
    ]);
    let full = Arc::clone(aggregator.full_catalog());
    let options = ScoringOptions::default().with_strategy(Strategy::Average);

    let ranked = aggregator.score(&full, &[1], &[], &options).unwrap();
    let order: Vec<BookId> = ranked.iter().map(|r| r.book.id).collect();
    assert_eq!(order, vec![2, 3]);
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn test_disliked_book_is_removed_not_demoted() {
    let aggregator = aggregator_for(vec![
        book(1, "A", "fantasy", "X", 2000, 200),
        book(2, "B", "fantasy", "Y", 2000, 200),
        book(3, "C", "drama", "Z", 2000, 200),
    ]);
    let full = Arc::clone(aggregator.full_catalog());
    let options = ScoringOptions::default()
        .with_strategy(Strategy::Average)
        .with_penalty_factor(1.0);

    let ranked = aggregator.score(&full, &[1], &[3], &options).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].book.id, 2);
}

#[test]
fn test_higher_penalty_never_raises_a_score() {
    let aggregator = create_test_setup();
    let full = Arc::clone(aggregator.full_catalog());

    for strategy in Strategy::ALL {
        let mut previous: Option<HashMap<BookId, f32>> = None;
        for factor in [0.0, 0.25, 0.5, 0.7, 1.0] {
            let options = ScoringOptions::default()
                .with_strategy(strategy)
                .with_penalty_factor(factor);
            let scores: HashMap<BookId, f32> = aggregator
                .score(&full, &[1, 4], &[5, 7], &options)
                .unwrap()
                .into_iter()
                .map(|r| (r.book.id, r.score))
                .collect();

            assert!(scores.values().all(|s| *s >= 0.0));
            if let Some(previous) = &previous {
                for (id, score) in &scores {
                    assert!(
                        *score <= previous[id] + 1e-6,
                        "{} raised book {} at factor {}",
                        strategy,
                        id,
                        factor
                    );
                }
            }
            previous = Some(scores);
        }
    }
}

#[test]
fn test_liked_book_outside_filters_still_counts() {
    let aggregator = create_test_setup();
    let full = Arc::clone(aggregator.full_catalog());

    // Filter down to dystopias and dramas; the liked Hobbit is not a candidate
    let criteria = FilterCriteria {
        genre: vec!["dystopia".to_string(), "drama".to_string()],
        ..FilterCriteria::default()
    };
    let candidates = criteria.apply(&full);
    assert_eq!(candidates.ids(), vec![4, 5, 7]);

    let ranked = aggregator
        .recommend(&candidates, &[1], &[], &ScoringOptions::default())
        .unwrap();
    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|r| candidates.contains_id(r.book.id)));
    // Dystopias sit closer to fantasy in the genre tree than drama
    assert_ne!(ranked[0].book.id, 5);
}

#[test]
fn test_boost_prefers_modal_author() {
    let aggregator = create_test_setup();
    let full = Arc::clone(aggregator.full_catalog());

    let ranked = aggregator
        .recommend(&full, &[1], &[], &ScoringOptions::default().with_limit(3))
        .unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].book.title, "The Silmarillion");
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_unresolved_likes_are_dropped() {
    let aggregator = create_test_setup();
    let full = Arc::clone(aggregator.full_catalog());
    let options = ScoringOptions::default();

    let with_unknown = aggregator.score(&full, &[1, 999], &[404], &options).unwrap();
    let without = aggregator.score(&full, &[1], &[], &options).unwrap();
    assert_eq!(with_unknown, without);

    assert!(matches!(
        aggregator.score(&full, &[999], &[], &options),
        Err(RecommendError::EmptyPreferences)
    ));
}
