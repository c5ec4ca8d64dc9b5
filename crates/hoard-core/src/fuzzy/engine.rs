//! Matcher - multi-field scoring and ranked search

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalize::normalize;
use super::strategies::score_normalized;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A candidate paired with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    pub item: T,
    pub score: f64,
}

impl<T> Scored<T> {
    pub fn new(item: T, score: f64) -> Self {
        Self { item, score }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scored<U> {
        Scored::new(f(self.item), self.score)
    }
}

/// Reads one textual field out of a candidate. `None` means the field is missing.
pub type Extractor<T> = fn(&T) -> Option<&str>;

/// Which fields of a candidate are searched, and how much each one counts.
///
/// Fields are alternative match surfaces: the best weighted field sets the base
/// score, and the query scored against all fields joined together adds
/// `bonus_weight` on top.
///
/// ```rust
/// use hoard_core::fuzzy::FieldSchema;
///
/// struct Track { title: String, artist: Option<String> }
///
/// let schema = FieldSchema::<Track>::new(0.05)
///     .field(|t| Some(t.title.as_str()), 0.6)
///     .field(|t| t.artist.as_deref(), 0.35);
/// assert_eq!(schema.len(), 2);
/// ```
pub struct FieldSchema<T> {
    fields: Vec<(Extractor<T>, f64)>,
    bonus_weight: f64,
}

impl<T> FieldSchema<T> {
    /// Empty schema with the given combined-fields bonus weight
    pub fn new(bonus_weight: f64) -> Self {
        Self {
            fields: Vec::new(),
            bonus_weight,
        }
    }

    /// Single always-present field with weight 1.0 and no bonus
    pub fn single(extractor: Extractor<T>) -> Self {
        Self::new(0.0).field(extractor, 1.0)
    }

    pub fn field(mut self, extractor: Extractor<T>, weight: f64) -> Self {
        self.fields.push((extractor, weight));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn bonus_weight(&self) -> f64 {
        self.bonus_weight
    }

    /// Aggregate score of `candidate` for an already-normalized query.
    ///
    /// Not clamped: base + bonus may exceed 1.0 slightly.
    pub fn score_normalized(&self, query: &str, candidate: &T) -> f64 {
        let mut base = 0.0_f64;
        let mut present: Vec<&str> = Vec::with_capacity(self.fields.len());

        for (extract, weight) in &self.fields {
            if let Some(text) = extract(candidate) {
                base = base.max(score_normalized(query, &normalize(text)) * weight);
                present.push(text);
            }
        }

        if self.bonus_weight == 0.0 || present.is_empty() {
            return base;
        }

        let combined = normalize(&present.join(" "));
        base + score_normalized(query, &combined) * self.bonus_weight
    }
}

/// Score one record against a raw query using `schema`.
pub fn score_record<T>(query: &str, candidate: &T, schema: &FieldSchema<T>) -> f64 {
    schema.score_normalized(&normalize(query), candidate)
}

/// Matcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Default threshold for [`Matcher::search`]
    pub min_score: f64,
    /// Threshold for [`Matcher::suggest`]
    pub suggest_min_score: f64,
    /// Default result count for suggestion lists
    pub max_suggestions: usize,
    /// Candidate count at which scoring goes parallel (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            suggest_min_score: 0.25,
            max_suggestions: 5,
            parallel_threshold: 1000,
        }
    }
}

/// Stateless fuzzy matcher.
///
/// Holds configuration only, so one instance can be shared freely across
/// threads. With the `parallel` feature, large candidate sets are scored
/// with rayon; results are identical to sequential scoring.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with default configuration
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// [`Matcher::rank`] with the configured `min_score`
    pub fn search<'c, T: Sync>(
        &self,
        candidates: &'c [T],
        query: &str,
        schema: &FieldSchema<T>,
    ) -> Vec<Scored<&'c T>> {
        self.rank(candidates, query, self.config.min_score, schema)
    }

    /// Rank `candidates` by relevance to `query`.
    ///
    /// A blank query returns every candidate with score 1.0 in input order.
    /// Otherwise candidates scoring below `threshold` are dropped (equality
    /// passes) and the rest come back best first; equal scores keep input order.
    pub fn rank<'c, T: Sync>(
        &self,
        candidates: &'c [T],
        query: &str,
        threshold: f64,
        schema: &FieldSchema<T>,
    ) -> Vec<Scored<&'c T>> {
        if query.trim().is_empty() {
            return candidates.iter().map(|c| Scored::new(c, 1.0)).collect();
        }

        let query_normalized = normalize(query);
        let mut matches = self.score_all(candidates, &query_normalized, threshold, schema);

        // sort_by is stable: ties stay in input order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            query = %query_normalized,
            candidates = candidates.len(),
            matched = matches.len(),
            threshold,
            "ranked candidates"
        );

        matches
    }

    /// [`Matcher::rank`] truncated to the best `limit` results
    pub fn rank_top<'c, T: Sync>(
        &self,
        candidates: &'c [T],
        query: &str,
        threshold: f64,
        schema: &FieldSchema<T>,
        limit: usize,
    ) -> Vec<Scored<&'c T>> {
        let mut matches = self.rank(candidates, query, threshold, schema);
        matches.truncate(limit);
        matches
    }

    /// Autocomplete-style matching over plain strings.
    ///
    /// Uses `suggest_min_score` and returns only the matched strings, best first.
    pub fn suggest<'c, S: AsRef<str> + Sync>(
        &self,
        candidates: &'c [S],
        query: &str,
        max_results: usize,
    ) -> Vec<&'c str> {
        let schema = FieldSchema::<S>::single(|s| Some(s.as_ref()));
        self.rank_top(
            candidates,
            query,
            self.config.suggest_min_score,
            &schema,
            max_results,
        )
        .into_iter()
        .map(|m| m.item.as_ref())
        .collect()
    }

    /// Score and filter - parallel for large inputs when the feature is on
    #[cfg(feature = "parallel")]
    fn score_all<'c, T: Sync>(
        &self,
        candidates: &'c [T],
        query: &str,
        threshold: f64,
        schema: &FieldSchema<T>,
    ) -> Vec<Scored<&'c T>> {
        if candidates.len() >= self.config.parallel_threshold {
            // collect keeps input order, so the stable sort below stays deterministic
            candidates
                .par_iter()
                .map(|c| Scored::new(c, schema.score_normalized(query, c)))
                .filter(|m| m.score >= threshold)
                .collect()
        } else {
            score_sequential(candidates, query, threshold, schema)
        }
    }

    /// Sequential scoring when the parallel feature is disabled
    #[cfg(not(feature = "parallel"))]
    fn score_all<'c, T: Sync>(
        &self,
        candidates: &'c [T],
        query: &str,
        threshold: f64,
        schema: &FieldSchema<T>,
    ) -> Vec<Scored<&'c T>> {
        score_sequential(candidates, query, threshold, schema)
    }
}

fn score_sequential<'c, T>(
    candidates: &'c [T],
    query: &str,
    threshold: f64,
    schema: &FieldSchema<T>,
) -> Vec<Scored<&'c T>> {
    candidates
        .iter()
        .map(|c| Scored::new(c, schema.score_normalized(query, c)))
        .filter(|m| m.score >= threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Entry {
        title: &'static str,
        author: Option<&'static str>,
        series: Option<&'static str>,
    }

    fn entry(
        title: &'static str,
        author: Option<&'static str>,
        series: Option<&'static str>,
    ) -> Entry {
        Entry {
            title,
            author,
            series,
        }
    }

    fn entry_schema() -> FieldSchema<Entry> {
        FieldSchema::<Entry>::new(0.05)
            .field(|e| Some(e.title), 0.4)
            .field(|e| e.author, 0.3)
            .field(|e| e.series, 0.25)
    }

    fn titles(matches: &[Scored<&Entry>]) -> Vec<&'static str> {
        matches.iter().map(|m| m.item.title).collect()
    }

    #[test]
    fn test_best_field_wins_plus_bonus() {
        let schema = entry_schema();
        let e = entry("Dune", Some("Frank Herbert"), None);
        // title exact: 1.0 * 0.4; combined "dune frank herbert" contains "dune": 0.9 * 0.05
        let s = score_record("dune", &e, &schema);
        assert!((s - (0.4 + 0.045)).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_missing_fields_contribute_nothing() {
        let schema = entry_schema();
        let e = entry("Dune", None, None);
        assert_eq!(score_record("herbert", &e, &schema), 0.0);
    }

    #[test]
    fn test_no_fields_scores_zero() {
        let schema = FieldSchema::<Entry>::new(0.05);
        assert!(schema.is_empty());
        assert_eq!(score_record("dune", &entry("Dune", None, None), &schema), 0.0);
    }

    #[test]
    fn test_aggregate_not_clamped() {
        let schema = FieldSchema::<Entry>::new(0.05).field(|e| Some(e.title), 1.0);
        let s = score_record("dune", &entry("Dune", None, None), &schema);
        assert!((s - 1.05).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_empty_candidates() {
        let matcher = Matcher::new();
        let none: Vec<Entry> = Vec::new();
        assert!(matcher.rank(&none, "anything", 0.3, &entry_schema()).is_empty());
    }

    #[test]
    fn test_blank_query_passthrough() {
        let matcher = Matcher::new();
        let entries = vec![
            entry("B", None, None),
            entry("A", None, None),
            entry("C", None, None),
        ];
        let matches = matcher.rank(&entries, "   ", 0.3, &entry_schema());
        assert_eq!(titles(&matches), vec!["B", "A", "C"]);
        assert!(matches.iter().all(|m| m.score == 1.0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let matcher = Matcher::new();
        let schema = FieldSchema::<Entry>::new(0.0).field(|e| Some(e.title), 0.5);
        let entries = vec![entry("Dune", None, None)];

        assert_eq!(matcher.rank(&entries, "dune", 0.5, &schema).len(), 1);
        assert!(matcher.rank(&entries, "dune", 0.500_001, &schema).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let matcher = Matcher::new();
        let entries = vec![
            entry("Dune Messiah", None, None),
            entry("Children of Dune", None, None),
            entry("Dune", None, None),
        ];
        let schema = FieldSchema::single(|e: &Entry| Some(e.title));
        let matches = matcher.rank(&entries, "dune", 0.3, &schema);
        assert_eq!(titles(&matches), vec!["Dune", "Dune Messiah", "Children of Dune"]);
    }

    #[test]
    fn test_rank_top_truncates() {
        let matcher = Matcher::new();
        let entries = vec![
            entry("Dune", None, None),
            entry("Dune Messiah", None, None),
            entry("Children of Dune", None, None),
        ];
        let schema = FieldSchema::single(|e: &Entry| Some(e.title));
        assert_eq!(matcher.rank_top(&entries, "dune", 0.3, &schema, 2).len(), 2);
        assert_eq!(matcher.rank_top(&entries, "", 0.3, &schema, 1).len(), 1);
    }

    #[test]
    fn test_suggest() {
        let matcher = Matcher::new();
        let titles = vec![
            "The Fellowship of the Ring".to_string(),
            "The Two Towers".to_string(),
            "The Return of the King".to_string(),
            "Ringworld".to_string(),
        ];
        // "king" is one edit away from "ring", so the third title scores a partial match
        let suggestions = matcher.suggest(&titles, "ring", 5);
        assert_eq!(
            suggestions,
            vec!["The Fellowship of the Ring", "Ringworld", "The Return of the King"]
        );

        assert_eq!(matcher.suggest(&titles, "the", 1), vec!["The Fellowship of the Ring"]);
    }

    #[test]
    fn test_search_uses_configured_threshold() {
        let matcher = Matcher::with_config(MatcherConfig {
            min_score: 0.95,
            ..Default::default()
        });
        let entries = vec![entry("Dune", None, None), entry("Dune Messiah", None, None)];
        let schema = FieldSchema::single(|e: &Entry| Some(e.title));
        let matches = matcher.search(&entries, "dune", &schema);
        assert_eq!(titles(&matches), vec!["Dune"]);
    }
}
