//! Text normalization
//!
//! Every comparison in the matcher happens on normalized text: decomposed,
//! diacritic-free, lowercase ASCII letters and digits separated by single spaces.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Produce the canonical comparable form of `text`.
///
/// 1. Canonical decomposition (NFD)
/// 2. Drop combining marks
/// 3. Lowercase
/// 4. Anything outside `[a-z0-9]` and whitespace becomes a space
/// 5. Collapse whitespace runs, trim
///
/// ```rust
/// use hoard_core::fuzzy::normalize;
///
/// assert_eq!(normalize("Café"), "cafe");
/// assert_eq!(normalize("  Dr. Who?! "), "dr who");
/// ```
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for ch in text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace() {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into its words.
#[inline]
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize("Café"), normalize("cafe"));
        assert_eq!(normalize("Gabriel García Márquez"), "gabriel garcia marquez");
        // Æ and ø have no decomposition
        assert_eq!(normalize("Ærø"), "r");
    }

    #[test]
    fn test_punctuation_becomes_space() {
        assert_eq!(normalize("Dr. Who"), "dr who");
        assert_eq!(normalize("L'Étranger"), "l etranger");
        assert_eq!(normalize("Harry_Potter-7"), "harry potter 7");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  The\t\tHobbit \n"), "the hobbit");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!! ???"), "");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("the lord of the rings"), vec!["the", "lord", "of", "the", "rings"]);
        assert!(tokenize("").is_empty());
    }
}
