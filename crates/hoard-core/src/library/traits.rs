//! The book store seam

use crate::library::error::LibraryResult;
use crate::library::types::Book;

/// Keeping books by id.
///
/// Ids are opaque strings chosen by the caller (or by `hoard-search add`).
/// Every write validates the record first: a blank id or title, or a rating
/// above `MAX_RATING`, is `LibraryError::InvalidData` and leaves the store
/// untouched.
pub trait BookStore {
    /// Add a new book; an id already on the shelf is `AlreadyExists`.
    fn put(&mut self, book: Book) -> LibraryResult<()>;

    /// Look a book up by id.
    fn get(&self, id: &str) -> LibraryResult<Option<Book>>;

    fn exists(&self, id: &str) -> LibraryResult<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Take a book off the shelf. `false` when the id was never there.
    fn delete(&mut self, id: &str) -> LibraryResult<bool>;

    /// Swap in a new version of a shelved book, keeping its position.
    /// An unknown id is `NotFound`.
    fn update(&mut self, book: Book) -> LibraryResult<()>;

    /// Ids in the order the books were added.
    fn ids(&self) -> LibraryResult<Vec<String>>;

    fn count(&self) -> LibraryResult<usize> {
        Ok(self.ids()?.len())
    }

    /// Empty the shelf.
    fn clear(&mut self) -> LibraryResult<()>;
}
