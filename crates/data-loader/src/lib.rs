//! # Data Loader Crate
//!
//! This crate handles loading, validating and indexing the book catalog.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Book, Catalog)
//! - **parser**: Parse the catalog CSV into `Book` records
//! - **index**: Catalog construction, validation, narrowing and title lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/books.csv"))?;
//! let hobbit = catalog.find_by_title("hobbit").unwrap();
//! let same_author = catalog.filter(|b| b.author == hobbit.author);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{Book, BookId, Catalog};
