use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Recommend(#[from] pipeline::RecommendError),

    #[error(transparent)]
    Similarity(#[from] similarity::SimilarityError),

    #[error("Failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
