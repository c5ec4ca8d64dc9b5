//! In-memory book library
//!
//! Books are kept in insertion order, which is also the tie-break order for
//! search results with equal scores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fuzzy::normalize;
use crate::library::error::{LibraryError, LibraryResult};
use crate::library::traits::BookStore;
use crate::library::types::{
    Author, Book, BookFilter, LibraryStats, ReadingStatus, Saga, MAX_RATING,
};

/// On-disk JSON shape of a library
#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    books: Vec<Book>,
}

/// In-memory book library.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create a new empty library.
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Create a library from books, rejecting invalid or duplicate entries.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> LibraryResult<Self> {
        let mut library = Self::new();
        for book in books {
            library.put(book)?;
        }
        Ok(library)
    }

    /// Parse a library from its JSON form (`{"books": [...]}`).
    pub fn from_json(json: &str) -> LibraryResult<Self> {
        let file: LibraryFile = serde_json::from_str(json)?;
        Self::with_books(file.books)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> LibraryResult<String> {
        let file = LibraryFile {
            books: self.books.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Books matching `filter`, in insertion order.
    pub fn filter(&self, filter: &BookFilter) -> Vec<Book> {
        self.books
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect()
    }

    /// Distinct authors in order of first appearance.
    ///
    /// Names that normalize to the same text are the same author; the first
    /// spelling seen is kept.
    pub fn authors(&self) -> Vec<Author> {
        let mut authors: Vec<Author> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for book in &self.books {
            let Some(name) = book.author.as_deref() else {
                continue;
            };
            let key = normalize(name);
            if key.is_empty() {
                continue;
            }
            let slot = *index.entry(key).or_insert_with(|| {
                authors.push(Author {
                    name: name.to_string(),
                    book_ids: Vec::new(),
                });
                authors.len() - 1
            });
            authors[slot].book_ids.push(book.id.clone());
        }

        authors
    }

    /// Distinct sagas in order of first appearance, books in reading order.
    pub fn sagas(&self) -> Vec<Saga> {
        let mut groups: Vec<(Saga, Vec<(Option<u32>, String)>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for book in &self.books {
            let Some(name) = book.saga.as_deref() else {
                continue;
            };
            let key = normalize(name);
            if key.is_empty() {
                continue;
            }
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((
                    Saga {
                        name: name.to_string(),
                        author: book.author.clone(),
                        book_ids: Vec::new(),
                    },
                    Vec::new(),
                ));
                groups.len() - 1
            });
            groups[slot].1.push((book.saga_number, book.id.clone()));
        }

        groups
            .into_iter()
            .map(|(mut saga, mut entries)| {
                // Stable: equal numbers keep library order, None sorts last
                entries.sort_by_key(|(number, _)| number.map_or(u64::MAX, u64::from));
                saga.book_ids = entries.into_iter().map(|(_, id)| id).collect();
                saga
            })
            .collect()
    }

    /// Books of one saga in reading order. Empty if the saga is unknown.
    pub fn saga_books(&self, name: &str) -> Vec<Book> {
        let key = normalize(name);
        self.sagas()
            .into_iter()
            .find(|s| normalize(&s.name) == key)
            .map(|s| {
                s.book_ids
                    .iter()
                    .filter_map(|id| self.find(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get library statistics.
    pub fn stats(&self) -> LibraryStats {
        let mut stats = LibraryStats {
            total_books: self.books.len(),
            unique_authors: self.authors().len(),
            unique_sagas: self.sagas().len(),
            ..Default::default()
        };

        let mut rating_sum = 0u32;
        let mut rated = 0u32;
        for book in &self.books {
            match book.status {
                ReadingStatus::ToRead => stats.to_read += 1,
                ReadingStatus::Reading => stats.reading += 1,
                ReadingStatus::Read => stats.read += 1,
                ReadingStatus::Abandoned => stats.abandoned += 1,
            }
            if book.wishlist {
                stats.wishlist += 1;
            }
            if let Some(rating) = book.rating {
                rating_sum += u32::from(rating);
                rated += 1;
            }
        }

        if rated > 0 {
            stats.average_rating = Some(f64::from(rating_sum) / f64::from(rated));
        }

        stats
    }

    fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }
}

/// Reject books the rest of the system cannot work with.
fn validate(book: &Book) -> LibraryResult<()> {
    if book.id.trim().is_empty() {
        return Err(LibraryError::InvalidData("book id is empty".to_string()));
    }
    if book.title.trim().is_empty() {
        return Err(LibraryError::InvalidData(format!(
            "book '{}' has an empty title",
            book.id
        )));
    }
    if let Some(rating) = book.rating {
        if rating > MAX_RATING {
            return Err(LibraryError::InvalidData(format!(
                "book '{}' has rating {} (max {})",
                book.id, rating, MAX_RATING
            )));
        }
    }
    Ok(())
}

impl BookStore for Library {
    fn put(&mut self, book: Book) -> LibraryResult<()> {
        validate(&book)?;
        if self.position(&book.id).is_some() {
            return Err(LibraryError::AlreadyExists(book.id));
        }
        self.books.push(book);
        Ok(())
    }

    fn get(&self, id: &str) -> LibraryResult<Option<Book>> {
        Ok(self.find(id).cloned())
    }

    fn delete(&mut self, id: &str) -> LibraryResult<bool> {
        match self.position(id) {
            Some(pos) => {
                self.books.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update(&mut self, book: Book) -> LibraryResult<()> {
        validate(&book)?;
        let Some(pos) = self.position(&book.id) else {
            return Err(LibraryError::NotFound(book.id));
        };
        self.books[pos] = book;
        Ok(())
    }

    fn ids(&self) -> LibraryResult<Vec<String>> {
        Ok(self.books.iter().map(|b| b.id.clone()).collect())
    }

    fn count(&self) -> LibraryResult<usize> {
        Ok(self.books.len())
    }

    fn clear(&mut self) -> LibraryResult<()> {
        self.books.clear();
        Ok(())
    }
}
