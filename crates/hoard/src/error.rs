//! Common error types for MyBookHoard Rust components.

use hoard_core::library::LibraryError;
use thiserror::Error;

/// Common error type for MyBookHoard operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Library validation or decoding error
    #[error("library error: {0}")]
    Library(#[from] LibraryError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),
}

/// Result type alias using the shared Error.
pub type Result<T> = std::result::Result<T, Error>;
