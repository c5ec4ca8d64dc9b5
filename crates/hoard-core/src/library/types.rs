//! Book library type definitions

use serde::{Deserialize, Serialize};

use crate::fuzzy::normalize;

/// Highest rating a book can carry
pub const MAX_RATING: u8 = 5;

/// Where the reader is with a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    ToRead,
    Reading,
    Read,
    Abandoned,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::ToRead,
        ReadingStatus::Reading,
        ReadingStatus::Read,
        ReadingStatus::Abandoned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::ToRead => "to_read",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Read => "read",
            ReadingStatus::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).replace(' ', "_").as_str() {
            "to_read" | "toread" | "unread" => Ok(ReadingStatus::ToRead),
            "reading" => Ok(ReadingStatus::Reading),
            "read" => Ok(ReadingStatus::Read),
            "abandoned" => Ok(ReadingStatus::Abandoned),
            other => Err(format!("unknown reading status: {other}")),
        }
    }
}

/// A book in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique within a library
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Saga / series name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saga: Option<String>,

    /// Position inside the saga (1-based by convention)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saga_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: ReadingStatus,

    #[serde(default)]
    pub wishlist: bool,

    /// 0 to [`MAX_RATING`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// When the book was added (Unix timestamp milliseconds)
    #[serde(default)]
    pub added_at: i64,
}

impl Book {
    /// A to-read book with only an id and a title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: None,
            saga: None,
            saga_number: None,
            description: None,
            status: ReadingStatus::default(),
            wishlist: false,
            rating: None,
            added_at: 0,
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn saga(mut self, saga: impl Into<String>, number: Option<u32>) -> Self {
        self.saga = Some(saga.into());
        self.saga_number = number;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn wishlist(mut self, wishlist: bool) -> Self {
        self.wishlist = wishlist;
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn added_at(mut self, timestamp_ms: i64) -> Self {
        self.added_at = timestamp_ms;
        self
    }
}

/// An author, derived from the books that name them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Book IDs in library order
    pub book_ids: Vec<String>,
}

/// A saga, derived from the books that belong to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saga {
    pub name: String,
    /// Author of the first book seen in this saga
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Book IDs in reading order; unnumbered books last
    pub book_ids: Vec<String>,
}

/// Filter applied to books before searching or listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub status: Option<ReadingStatus>,
    pub wishlist: Option<bool>,
    /// Compared after normalization
    pub saga: Option<String>,
    pub min_rating: Option<u8>,
}

impl BookFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn wishlist(mut self, wishlist: bool) -> Self {
        self.wishlist = Some(wishlist);
        self
    }

    pub fn saga(mut self, saga: impl Into<String>) -> Self {
        self.saga = Some(saga.into());
        self
    }

    pub fn min_rating(mut self, rating: u8) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, book: &Book) -> bool {
        if let Some(status) = self.status {
            if book.status != status {
                return false;
            }
        }

        if let Some(wishlist) = self.wishlist {
            if book.wishlist != wishlist {
                return false;
            }
        }

        if let Some(saga) = &self.saga {
            match &book.saga {
                Some(book_saga) if normalize(book_saga) == normalize(saga) => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_rating {
            if book.rating.map_or(true, |r| r < min) {
                return false;
            }
        }

        true
    }
}

/// Library statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub to_read: usize,
    pub reading: usize,
    pub read: usize,
    pub abandoned: usize,
    pub wishlist: usize,
    pub unique_authors: usize,
    pub unique_sagas: usize,
    /// Mean over rated books only
    pub average_rating: Option<f64>,
}
