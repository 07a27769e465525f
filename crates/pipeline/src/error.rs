use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("No liked books: recommendations need at least one preference")]
    EmptyPreferences,

    #[error("Unknown strategy: {0} (expected average, union, combined or content_boost)")]
    UnknownStrategy(String),

    #[error(transparent)]
    Similarity(#[from] similarity::SimilarityError),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
