//! One-shot commands over a loaded library.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use hoard::persist::{load_library, save_library};
use hoard::{Result, SearchSettings};
use hoard_core::fuzzy::Matcher;
use hoard_core::library::{Book, BookFilter, BookStore, Library, SearchThresholds};
use tracing::{debug, info};

use crate::output::{self, Format};

/// Which names `suggest` completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestKind {
    #[default]
    Titles,
    Authors,
}

/// Matcher, thresholds and output format shared by every command
#[derive(Debug, Clone)]
pub struct Searcher {
    matcher: Matcher,
    thresholds: SearchThresholds,
    format: Format,
}

impl Searcher {
    pub fn new(settings: &SearchSettings, format: Format) -> Self {
        Self {
            matcher: Matcher::with_config(settings.matcher.clone()),
            thresholds: settings.thresholds.clone(),
            format,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn books(
        &self,
        library: &Library,
        query: &str,
        filter: &BookFilter,
        limit: Option<usize>,
    ) -> Result<String> {
        let mut matches = library.search_books(&self.matcher, query, filter, &self.thresholds);
        debug!(query, filtered = !filter.is_empty(), hits = matches.len(), "book search");
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        Ok(output::render_books(&matches, self.format)?)
    }

    pub fn authors(&self, library: &Library, query: &str, limit: Option<usize>) -> Result<String> {
        let mut matches = library.search_authors(&self.matcher, query, &self.thresholds);
        debug!(query, hits = matches.len(), "author search");
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        Ok(output::render_authors(&matches, self.format)?)
    }

    pub fn sagas(&self, library: &Library, query: &str, limit: Option<usize>) -> Result<String> {
        let mut matches = library.search_sagas(&self.matcher, query, &self.thresholds);
        debug!(query, hits = matches.len(), "saga search");
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        Ok(output::render_sagas(&matches, self.format)?)
    }

    pub fn suggest(&self, library: &Library, query: &str, kind: SuggestKind) -> Result<String> {
        let max = self.matcher.config().max_suggestions;
        let suggestions = match kind {
            SuggestKind::Titles => library.suggest_titles(&self.matcher, query, max),
            SuggestKind::Authors => library.suggest_authors(&self.matcher, query, max),
        };
        Ok(output::render_suggestions(query, &suggestions, self.format)?)
    }

    pub fn stats(&self, library: &Library) -> Result<String> {
        Ok(output::render_stats(&library.stats(), self.format)?)
    }
}

/// Append `book` to the library file at `path`, creating the file if needed.
///
/// A blank id is replaced with the first free `book-N`. Returns the stored book.
pub fn add_book(path: &Path, mut book: Book) -> Result<Book> {
    let mut library = if path.exists() {
        load_library(path)?
    } else {
        Library::new()
    };

    if book.id.trim().is_empty() {
        book.id = next_id(&library)?;
    }
    if book.added_at == 0 {
        book.added_at = now_millis();
    }

    library.put(book.clone())?;
    save_library(path, &library)?;
    info!(id = %book.id, title = %book.title, path = %path.display(), "added book");
    Ok(book)
}

fn next_id(library: &Library) -> Result<String> {
    let mut n = library.count()? + 1;
    loop {
        let id = format!("book-{n}");
        if !library.exists(&id)? {
            return Ok(id);
        }
        n += 1;
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
