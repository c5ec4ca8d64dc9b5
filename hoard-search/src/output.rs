//! Result rendering for the terminal and for `--json`.

use hoard_core::fuzzy::Scored;
use hoard_core::library::{Author, Book, LibraryStats, Saga};
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Plain,
    Json,
}

impl Format {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Plain
        }
    }
}

/// Suggestion list as emitted with `--json`
#[derive(Debug, Serialize)]
struct Suggestions<'a> {
    query: &'a str,
    suggestions: &'a [String],
}

/// One-line description of a book
pub fn describe_book(book: &Book) -> String {
    let mut line = book.title.clone();
    if let Some(author) = &book.author {
        line.push_str(" by ");
        line.push_str(author);
    }
    match (&book.saga, book.saga_number) {
        (Some(saga), Some(n)) => line.push_str(&format!(" ({saga} #{n})")),
        (Some(saga), None) => line.push_str(&format!(" ({saga})")),
        _ => {}
    }
    line.push_str(&format!(" [{}]", book.status));
    if book.wishlist {
        line.push_str(" [wishlist]");
    }
    if let Some(rating) = book.rating {
        line.push_str(&format!(" {rating}/5"));
    }
    line
}

pub fn render_books(matches: &[Scored<Book>], format: Format) -> serde_json::Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(matches),
        Format::Plain => Ok(plain_lines(matches, describe_book)),
    }
}

pub fn render_authors(matches: &[Scored<Author>], format: Format) -> serde_json::Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(matches),
        Format::Plain => Ok(plain_lines(matches, |a| {
            format!("{} ({} books)", a.name, a.book_ids.len())
        })),
    }
}

pub fn render_sagas(matches: &[Scored<Saga>], format: Format) -> serde_json::Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(matches),
        Format::Plain => Ok(plain_lines(matches, |s| match &s.author {
            Some(author) => format!("{} by {} ({} books)", s.name, author, s.book_ids.len()),
            None => format!("{} ({} books)", s.name, s.book_ids.len()),
        })),
    }
}

pub fn render_suggestions(
    query: &str,
    suggestions: &[String],
    format: Format,
) -> serde_json::Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(&Suggestions { query, suggestions }),
        Format::Plain => Ok(suggestions.join("\n")),
    }
}

pub fn render_stats(stats: &LibraryStats, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(stats),
        Format::Plain => {
            let average = stats
                .average_rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
            Ok(format!(
                "books:     {}\n\
                 to read:   {}\n\
                 reading:   {}\n\
                 read:      {}\n\
                 abandoned: {}\n\
                 wishlist:  {}\n\
                 authors:   {}\n\
                 sagas:     {}\n\
                 rating:    {}",
                stats.total_books,
                stats.to_read,
                stats.reading,
                stats.read,
                stats.abandoned,
                stats.wishlist,
                stats.unique_authors,
                stats.unique_sagas,
                average,
            ))
        }
    }
}

fn plain_lines<T>(matches: &[Scored<T>], describe: impl Fn(&T) -> String) -> String {
    if matches.is_empty() {
        return "no matches".to_string();
    }
    matches
        .iter()
        .map(|m| format!("{:.3}  {}", m.score, describe(&m.item)))
        .collect::<Vec<_>>()
        .join("\n")
}
