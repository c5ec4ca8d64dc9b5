//! Library search
//!
//! Wires the library records into the fuzzy matcher: which fields count,
//! how much, and the per-kind cutoff.

use serde::{Deserialize, Serialize};

use crate::fuzzy::{FieldSchema, Matcher, Scored};
use crate::library::memory::Library;
use crate::library::types::{Author, Book, BookFilter, Saga};

/// Title is the primary match surface
pub const TITLE_WEIGHT: f64 = 0.4;
pub const AUTHOR_WEIGHT: f64 = 0.3;
pub const SAGA_WEIGHT: f64 = 0.25;
/// Query against title + author + saga joined
pub const COMBINED_BONUS_WEIGHT: f64 = 0.05;

/// Minimum score per record kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchThresholds {
    pub books: f64,
    pub authors: f64,
    pub sagas: f64,
}

impl Default for SearchThresholds {
    fn default() -> Self {
        Self {
            books: 0.25,
            authors: 0.4,
            sagas: 0.4,
        }
    }
}

/// Field weights for book search
pub fn book_schema() -> FieldSchema<Book> {
    FieldSchema::<Book>::new(COMBINED_BONUS_WEIGHT)
        .field(|b| Some(b.title.as_str()), TITLE_WEIGHT)
        .field(|b| b.author.as_deref(), AUTHOR_WEIGHT)
        .field(|b| b.saga.as_deref(), SAGA_WEIGHT)
}

pub fn author_schema() -> FieldSchema<Author> {
    FieldSchema::<Author>::single(|a| Some(a.name.as_str()))
}

pub fn saga_schema() -> FieldSchema<Saga> {
    FieldSchema::<Saga>::single(|s| Some(s.name.as_str()))
}

impl Library {
    /// Ranked books among those passing `filter`.
    pub fn search_books(
        &self,
        matcher: &Matcher,
        query: &str,
        filter: &BookFilter,
        thresholds: &SearchThresholds,
    ) -> Vec<Scored<Book>> {
        let candidates = self.filter(filter);
        matcher
            .rank(&candidates, query, thresholds.books, &book_schema())
            .into_iter()
            .map(|m| m.map(Book::clone))
            .collect()
    }

    pub fn search_authors(
        &self,
        matcher: &Matcher,
        query: &str,
        thresholds: &SearchThresholds,
    ) -> Vec<Scored<Author>> {
        let authors = self.authors();
        matcher
            .rank(&authors, query, thresholds.authors, &author_schema())
            .into_iter()
            .map(|m| m.map(Author::clone))
            .collect()
    }

    pub fn search_sagas(
        &self,
        matcher: &Matcher,
        query: &str,
        thresholds: &SearchThresholds,
    ) -> Vec<Scored<Saga>> {
        let sagas = self.sagas();
        matcher
            .rank(&sagas, query, thresholds.sagas, &saga_schema())
            .into_iter()
            .map(|m| m.map(Saga::clone))
            .collect()
    }

    /// Title completions for `query`, best first.
    pub fn suggest_titles(
        &self,
        matcher: &Matcher,
        query: &str,
        max_results: usize,
    ) -> Vec<String> {
        let titles: Vec<&str> = self.books().iter().map(|b| b.title.as_str()).collect();
        matcher
            .suggest(&titles, query, max_results)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Author name completions for `query`, best first.
    pub fn suggest_authors(
        &self,
        matcher: &Matcher,
        query: &str,
        max_results: usize,
    ) -> Vec<String> {
        let names: Vec<String> = self.authors().into_iter().map(|a| a.name).collect();
        matcher
            .suggest(&names, query, max_results)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::types::ReadingStatus;

    fn library() -> Library {
        Library::with_books(vec![
            Book::new("b1", "The Fellowship of the Ring")
                .author("J. R. R. Tolkien")
                .saga("The Lord of the Rings", Some(1))
                .status(ReadingStatus::Read),
            Book::new("b2", "The Two Towers")
                .author("J. R. R. Tolkien")
                .saga("The Lord of the Rings", Some(2)),
            Book::new("b3", "Mistborn: The Final Empire")
                .author("Brandon Sanderson")
                .saga("Mistborn", Some(1))
                .wishlist(true),
            Book::new("b4", "Dune").author("Frank Herbert"),
        ])
        .unwrap()
    }

    fn ids(matches: &[Scored<Book>]) -> Vec<&str> {
        matches.iter().map(|m| m.item.id.as_str()).collect()
    }

    #[test]
    fn test_book_schema_fields() {
        let schema = book_schema();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.bonus_weight(), COMBINED_BONUS_WEIGHT);
        assert_eq!(author_schema().len(), 1);
        assert_eq!(saga_schema().bonus_weight(), 0.0);
    }

    #[test]
    fn test_book_by_title() {
        let matches = library().search_books(
            &Matcher::new(),
            "dune",
            &BookFilter::new(),
            &SearchThresholds::default(),
        );
        assert_eq!(ids(&matches), vec!["b4"]);
        assert!((matches[0].score - 0.445).abs() < 1e-9);
    }

    #[test]
    fn test_book_by_author() {
        let matches = library().search_books(
            &Matcher::new(),
            "tolkien",
            &BookFilter::new(),
            &SearchThresholds::default(),
        );
        // Author substring: 0.9 * 0.3 + combined 0.9 * 0.05; same for both books
        assert_eq!(ids(&matches), vec!["b1", "b2"]);
        assert!((matches[0].score - 0.315).abs() < 1e-9);
    }

    #[test]
    fn test_book_search_respects_filter() {
        let matches = library().search_books(
            &Matcher::new(),
            "tolkien",
            &BookFilter::new().status(ReadingStatus::Read),
            &SearchThresholds::default(),
        );
        assert_eq!(ids(&matches), vec!["b1"]);
    }

    #[test]
    fn test_blank_book_query_lists_filtered() {
        let matches = library().search_books(
            &Matcher::new(),
            "",
            &BookFilter::new().wishlist(true),
            &SearchThresholds::default(),
        );
        assert_eq!(ids(&matches), vec!["b3"]);
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn test_author_word_order() {
        let matches = library().search_authors(
            &Matcher::new(),
            "sanderson brandon",
            &SearchThresholds::default(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.name, "Brandon Sanderson");
        assert_eq!(matches[0].score, 0.85);
    }

    #[test]
    fn test_saga_search() {
        let matches =
            library().search_sagas(&Matcher::new(), "lord rings", &SearchThresholds::default());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.book_ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_suggestions() {
        let library = library();
        let matcher = Matcher::new();
        assert_eq!(library.suggest_titles(&matcher, "towers", 5), vec!["The Two Towers"]);
        assert_eq!(library.suggest_authors(&matcher, "herbert", 5), vec!["Frank Herbert"]);
        assert!(library.suggest_titles(&matcher, "zzzz", 5).is_empty());
    }
}
