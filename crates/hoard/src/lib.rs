//! # MyBookHoard Shared Rust Library
//!
//! Infrastructure shared by the MyBookHoard binaries:
//! - **error**: Common error type wrapping I/O, JSON and library failures
//! - **tracing**: Logging setup
//! - **config**: Search settings read from the environment
//! - **persist**: Loading and saving library files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hoard::config::SearchSettings;
//! use hoard::persist::load_library;
//!
//! hoard::tracing::init();
//! let settings = SearchSettings::from_env()?;
//! let library = load_library("library.json")?;
//! ```

pub mod config;
pub mod error;
pub mod persist;
pub mod tracing;

// Re-export commonly used items at crate root
pub use config::SearchSettings;
pub use error::{Error, Result};
