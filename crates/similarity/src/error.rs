use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("Invalid weight for {name}: {value}")]
    InvalidWeight { name: String, value: f32 },

    #[error("Book not found: {0}")]
    BookNotFound(u32),
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
