//! Library error types

use thiserror::Error;

/// Errors that can occur during library operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// Book with this ID already exists
    #[error("book already exists: {0}")]
    AlreadyExists(String),

    /// Book not found
    #[error("book not found: {0}")]
    NotFound(String),

    /// Invalid book data
    #[error("invalid book data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Serialization(err.to_string())
    }
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
