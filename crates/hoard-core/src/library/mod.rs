//! Book library
//!
//! The records the matcher runs over: books, plus author and saga views
//! derived from them. `Library` is an in-memory store that keeps insertion
//! order, validates every write, and round-trips through JSON.
//!
//! # Example
//!
//! ```rust
//! use hoard_core::fuzzy::Matcher;
//! use hoard_core::library::{Book, BookFilter, BookStore, Library, SearchThresholds};
//!
//! let mut library = Library::new();
//! library
//!     .put(Book::new("b1", "The Name of the Wind").author("Patrick Rothfuss"))
//!     .unwrap();
//!
//! let matches = library.search_books(
//!     &Matcher::new(),
//!     "name wind",
//!     &BookFilter::new(),
//!     &SearchThresholds::default(),
//! );
//! assert_eq!(matches[0].item.id, "b1");
//! ```

mod error;
mod memory;
mod search;
mod traits;
mod types;

pub use error::{LibraryError, LibraryResult};
pub use memory::Library;
pub use search::{
    author_schema, book_schema, saga_schema, SearchThresholds, AUTHOR_WEIGHT,
    COMBINED_BONUS_WEIGHT, SAGA_WEIGHT, TITLE_WEIGHT,
};
pub use traits::BookStore;
pub use types::{Author, Book, BookFilter, LibraryStats, ReadingStatus, Saga, MAX_RATING};
