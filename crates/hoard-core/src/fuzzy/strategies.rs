//! Similarity scoring strategies
//!
//! Applied in strict order, first match wins:
//! 1. Exact match (score: 1.0)
//! 2. Substring match (score: 0.9)
//! 3. Token overlap (score: up to 0.85)
//! 4. Whole-string edit distance (score: 0.15-0.3)

use super::distance::similarity_at_least;
use super::normalize::{normalize, tokenize};

/// Score for a normalized query equal to the normalized text
pub const EXACT_SCORE: f64 = 1.0;
/// Score for text containing the whole query
pub const SUBSTRING_SCORE: f64 = 0.9;
/// Score when every query token matches strongly
pub const ALL_TOKENS_SCORE: f64 = 0.85;

const STRONG_TOKENS_WEIGHT: f64 = 0.7;
const PARTIAL_TOKENS_WEIGHT: f64 = 0.4;
const STRONG_QUALITY: f64 = 0.8;
const PARTIAL_QUALITY: f64 = 0.4;

const TOKEN_IDENTICAL: f64 = 1.0;
const TOKEN_CONTAINS_QUERY: f64 = 0.8;
const TOKEN_INSIDE_QUERY: f64 = 0.7;
const TOKEN_INSIDE_QUERY_MIN_LEN: usize = 3;
const TOKEN_SIMILARITY_FLOOR: f64 = 0.6;
const TOKEN_SIMILARITY_WEIGHT: f64 = 0.6;

const FALLBACK_SIMILARITY_FLOOR: f64 = 0.5;
const FALLBACK_WEIGHT: f64 = 0.3;

/// Relevance of `text` for `query`, in [0.0, 1.0].
///
/// Both sides are normalized first, so case, accents and punctuation never
/// affect the result.
///
/// ```rust
/// use hoard_core::fuzzy::score;
///
/// assert_eq!(score("cat", "Category"), 0.9);
/// assert_eq!(score("Café", "cafe"), 1.0);
/// ```
pub fn score(query: &str, text: &str) -> f64 {
    score_normalized(&normalize(query), &normalize(text))
}

/// [`score`] for inputs that already went through [`normalize`].
pub fn score_normalized(query: &str, text: &str) -> f64 {
    if query.is_empty() || text.is_empty() {
        return 0.0;
    }
    if query == text {
        return EXACT_SCORE;
    }
    if text.contains(query) {
        return SUBSTRING_SCORE;
    }

    if let Some(score) = token_overlap(query, text) {
        return score;
    }

    whole_string_fallback(query, text)
}

/// Quality of one query token against one text token.
fn token_quality(query_token: &str, text_token: &str) -> f64 {
    if query_token == text_token {
        return TOKEN_IDENTICAL;
    }
    if text_token.contains(query_token) {
        return TOKEN_CONTAINS_QUERY;
    }
    if query_token.contains(text_token) && text_token.chars().count() >= TOKEN_INSIDE_QUERY_MIN_LEN
    {
        return TOKEN_INSIDE_QUERY;
    }

    similarity_at_least(query_token, text_token, TOKEN_SIMILARITY_FLOOR)
        .map_or(0.0, |similarity| similarity * TOKEN_SIMILARITY_WEIGHT)
}

/// Token-level aggregate, or `None` when no query token scored at all.
fn token_overlap(query: &str, text: &str) -> Option<f64> {
    let query_tokens = tokenize(query);
    let text_tokens = tokenize(text);
    if query_tokens.is_empty() {
        return None;
    }

    let mut strong = 0usize;
    let mut partial = 0usize;
    for query_token in &query_tokens {
        let best = text_tokens
            .iter()
            .map(|text_token| token_quality(query_token, text_token))
            .fold(0.0_f64, f64::max);

        if best >= STRONG_QUALITY {
            strong += 1;
        } else if best >= PARTIAL_QUALITY {
            partial += 1;
        }
    }

    let total = query_tokens.len() as f64;
    if strong == query_tokens.len() {
        Some(ALL_TOKENS_SCORE)
    } else if strong > 0 {
        Some(STRONG_TOKENS_WEIGHT * (strong as f64 / total))
    } else if partial > 0 {
        Some(PARTIAL_TOKENS_WEIGHT * (partial as f64 / total))
    } else {
        None
    }
}

fn whole_string_fallback(query: &str, text: &str) -> f64 {
    similarity_at_least(query, text, FALLBACK_SIMILARITY_FLOOR)
        .map_or(0.0, |similarity| similarity * FALLBACK_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(score("", "dune"), 0.0);
        assert_eq!(score("dune", ""), 0.0);
        assert_eq!(score("?!", "dune"), 0.0);
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(score("dune", "dune"), 1.0);
        assert_eq!(score("The Hobbit", "the hobbit!"), 1.0);
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(score("cat", "category"), 0.9);
        assert!(score("cat", "category") > score("cat", "dog"));
        assert_eq!(score("harry", "Harry Potter"), 0.9);
    }

    #[test]
    fn test_all_tokens_strong() {
        // Both tokens present, but not as one substring
        assert_eq!(score("potter harry", "harry potter"), 0.85);
        // Prefix tokens count as strong (text token contains query token)
        assert_eq!(score("lord ring", "the lord of the rings"), 0.85);
    }

    #[test]
    fn test_some_tokens_strong() {
        // "harry" strong, "poter" vs "potter" is a 1-edit fuzzy match (partial)
        assert!(approx(score("harry potter", "harry poter"), 0.35));
        // "rowling" strong, "jk" matches nothing
        assert!(approx(score("rowling jk", "j k rowling"), 0.35));
    }

    #[test]
    fn test_partial_tokens_only() {
        // tolkein vs tolkien: two edits over seven characters
        let s = score("tolkein", "j r r tolkien");
        assert!(approx(s, 0.4), "got {s}");
    }

    #[test]
    fn test_query_token_containing_text_token() {
        // "stormlight" contains "storm" (len >= 3) -> 0.7, partial
        let s = score("stormlight", "storm front");
        assert!(approx(s, 0.4), "got {s}");
    }

    #[test]
    fn test_short_text_token_inside_query_ignored() {
        assert_eq!(token_quality("jk", "j"), 0.0);
        assert_eq!(token_quality("dune", "du"), 0.0);
        assert_eq!(token_quality("dunes", "dun"), 0.7);
    }

    #[test]
    fn test_token_quality_levels() {
        assert_eq!(token_quality("dune", "dune"), 1.0);
        assert_eq!(token_quality("dun", "dune"), 0.8);
        assert!(approx(token_quality("potter", "poter"), 0.5));
        assert_eq!(token_quality("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_unrelated_scores_zero() {
        assert_eq!(score("harry potter", "The Hobbit"), 0.0);
        assert_eq!(score("cat", "dog"), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let a = score("foundaton", "Foundation and Empire");
        let b = score("foundaton", "Foundation and Empire");
        assert_eq!(a, b);
    }
}
