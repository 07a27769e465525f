//! Common-feature boost.
//!
//! Rewards candidates that share the dominant genre or author of the liked
//! books. All multipliers compound into a single boost factor.

use data_loader::Book;
use serde::{Deserialize, Serialize};

/// Multiplier for sharing the most frequent liked genre
pub const MODAL_GENRE_BOOST: f32 = 1.2;
/// Multiplier for sharing the most frequent liked author
pub const MODAL_AUTHOR_BOOST: f32 = 1.3;
/// Per-match step applied when several liked books share the candidate's genre
pub const GENRE_MATCH_STEP: f32 = 0.15;
/// Per-match step applied when several liked books share the candidate's author
pub const AUTHOR_MATCH_STEP: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostFactors {
    pub modal_genre: f32,
    pub modal_author: f32,
    pub genre_step: f32,
    pub author_step: f32,
}

impl Default for BoostFactors {
    fn default() -> Self {
        Self {
            modal_genre: MODAL_GENRE_BOOST,
            modal_author: MODAL_AUTHOR_BOOST,
            genre_step: GENRE_MATCH_STEP,
            author_step: AUTHOR_MATCH_STEP,
        }
    }
}

/// Genres and authors of the liked books
#[derive(Debug, Clone, Default)]
pub struct LikedProfile {
    genres: Vec<String>,
    authors: Vec<String>,
    modal_genre: Option<String>,
    modal_author: Option<String>,
}

impl LikedProfile {
    pub fn new<'a>(liked: impl IntoIterator<Item = &'a Book>) -> Self {
        let (genres, authors): (Vec<String>, Vec<String>) = liked
            .into_iter()
            .map(|book| (book.genre.clone(), book.author.clone()))
            .unzip();
        Self {
            modal_genre: mode(&genres),
            modal_author: mode(&authors),
            genres,
            authors,
        }
    }

    pub fn modal_genre(&self) -> Option<&str> {
        self.modal_genre.as_deref()
    }

    pub fn modal_author(&self) -> Option<&str> {
        self.modal_author.as_deref()
    }

    /// Number of liked books with this genre
    pub fn genre_count(&self, genre: &str) -> usize {
        self.genres.iter().filter(|g| *g == genre).count()
    }

    /// Number of liked books by this author
    pub fn author_count(&self, author: &str) -> usize {
        self.authors.iter().filter(|a| *a == author).count()
    }
}

/// Applies the common-feature boost for one set of liked books
#[derive(Debug, Clone)]
pub struct FeatureBooster {
    profile: LikedProfile,
    factors: BoostFactors,
}

impl FeatureBooster {
    pub fn new(profile: LikedProfile, factors: BoostFactors) -> Self {
        Self { profile, factors }
    }

    pub fn profile(&self) -> &LikedProfile {
        &self.profile
    }

    /// Compound boost factor for a candidate, starting at 1.0
    pub fn boost(&self, book: &Book) -> f32 {
        let mut boost = 1.0;

        if self.profile.modal_genre() == Some(book.genre.as_str()) {
            boost *= self.factors.modal_genre;
        }
        if self.profile.modal_author() == Some(book.author.as_str()) {
            boost *= self.factors.modal_author;
        }

        let genre_matches = self.profile.genre_count(&book.genre);
        if genre_matches > 1 {
            boost *= 1.0 + self.factors.genre_step * genre_matches as f32;
        }
        let author_matches = self.profile.author_count(&book.author);
        if author_matches > 1 {
            boost *= 1.0 + self.factors.author_step * author_matches as f32;
        }

        boost
    }

    pub fn apply(&self, book: &Book, score: f32) -> f32 {
        score * self.boost(book)
    }
}

/// Most frequent value; ties go to the value seen first
fn mode(values: &[String]) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for (idx, value) in values.iter().enumerate() {
        // Count each distinct value once, at its first occurrence
        if values[..idx].contains(value) {
            continue;
        }
        let count = values.iter().filter(|v| *v == value).count();
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(genre: &str, author: &str) -> Book {
        Book {
            id: 1,
            title: "T".to_string(),
            author: author.to_string(),
            publisher: "P".to_string(),
            language: "english".to_string(),
            genre: genre.to_string(),
            year: 2000,
            pages: 100,
            age_restriction: 0,
            has_illustrations: false,
        }
    }

    #[test]
    fn test_mode_tie_breaks_by_first_seen() {
        let values: Vec<String> = ["drama", "fantasy", "fantasy", "drama", "poetry"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(mode(&values).as_deref(), Some("drama"));
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn test_single_like_boost() {
        let liked = [book("fantasy", "Tolkien")];
        let booster = FeatureBooster::new(LikedProfile::new(&liked), BoostFactors::default());

        assert!((booster.boost(&book("fantasy", "Tolkien")) - 1.2 * 1.3).abs() < 1e-6);
        assert!((booster.boost(&book("fantasy", "Lewis")) - 1.2).abs() < 1e-6);
        assert_eq!(booster.boost(&book("drama", "Chekhov")), 1.0);
    }

    #[test]
    fn test_boosts_compound() {
        let liked = [
            book("fantasy", "Tolkien"),
            book("fantasy", "Tolkien"),
            book("fantasy", "Lewis"),
            book("drama", "Lewis"),
        ];
        let booster = FeatureBooster::new(LikedProfile::new(&liked), BoostFactors::default());

        // modal genre, modal author, 3 genre matches, 2 author matches
        let expected = 1.2 * 1.3 * (1.0 + 0.15 * 3.0) * (1.0 + 0.2 * 2.0);
        assert!((booster.boost(&book("fantasy", "Tolkien")) - expected).abs() < 1e-5);

        // Lewis ties Tolkien on count but is seen later: no modal author boost
        let expected = 1.2 * (1.0 + 0.15 * 3.0) * (1.0 + 0.2 * 2.0);
        assert!((booster.boost(&book("fantasy", "Lewis")) - expected).abs() < 1e-5);
        assert!((booster.apply(&book("fantasy", "Lewis"), 0.5) - 0.5 * expected).abs() < 1e-5);
    }
}
