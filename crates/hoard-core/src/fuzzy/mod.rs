//! Fuzzy Matching Engine
//!
//! Typo-tolerant relevance scoring for short texts (titles, names, series).
//!
//! # Strategies (in order of precedence)
//!
//! 1. Exact match (score: 1.0)
//! 2. Substring match (score: 0.9)
//! 3. Token overlap (score: up to 0.85)
//!    - every query word matches strongly: 0.85
//!    - some strong words: 0.7 x strong / total
//!    - only partial words: 0.4 x partial / total
//! 4. Whole-string edit distance (score: up to 0.3)
//!
//! Multi-field records are scored through a [`FieldSchema`]: the best weighted
//! field wins, plus a small bonus for the query against all fields combined.
//!
//! # Example
//!
//! ```rust
//! use hoard_core::fuzzy::{FieldSchema, Matcher};
//!
//! let titles = vec![
//!     "Harry Potter and the Chamber of Secrets".to_string(),
//!     "The Hobbit".to_string(),
//!     "Harry Poter".to_string(),
//! ];
//!
//! let matcher = Matcher::new();
//! let schema = FieldSchema::single(|t: &String| Some(t.as_str()));
//! let matches = matcher.rank(&titles, "harry potter", 0.3, &schema);
//!
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].item, "Harry Potter and the Chamber of Secrets");
//! ```

mod distance;
mod engine;
mod normalize;
mod strategies;

pub use distance::{edit_distance, similarity_ratio};
pub use engine::{score_record, Extractor, FieldSchema, Matcher, MatcherConfig, Scored};
pub use normalize::{normalize, tokenize};
pub use strategies::{score, score_normalized};
