//! MyBookHoard Core Engine
//!
//! Search kernel for a personal book library: text normalization, typo-tolerant
//! scoring, multi-field ranking, and the library records it runs over.
//! Everything here is synchronous and pure apart from the in-memory store.
//!
//! # Features
//!
//! - `parallel` - Score large candidate sets with rayon
//!
//! # Example
//!
//! ```rust
//! use hoard_core::fuzzy::{edit_distance, normalize, score};
//!
//! assert_eq!(normalize("Café"), normalize("cafe"));
//! assert_eq!(edit_distance("kitten", "sitting"), 3);
//! assert_eq!(score("cat", "category"), 0.9);
//! ```

pub mod fuzzy;
pub mod library;

// Re-export main types at crate root
pub use fuzzy::{score, FieldSchema, Matcher, MatcherConfig, Scored};
pub use library::{
    Author, Book, BookFilter, BookStore, Library, LibraryError, LibraryStats, ReadingStatus,
    Saga, SearchThresholds,
};
