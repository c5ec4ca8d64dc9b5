//! Search settings from the environment.
//!
//! Environment variables:
//! - `HOARD_MIN_SCORE`: Default ranking threshold 0.0-1.0 (default: 0.3)
//! - `HOARD_SUGGEST_MIN_SCORE`: Suggestion threshold 0.0-1.0 (default: 0.25)
//! - `HOARD_MAX_SUGGESTIONS`: Suggestion list length (default: 5)
//! - `HOARD_BOOK_THRESHOLD`: Book search threshold (default: 0.25)
//! - `HOARD_AUTHOR_THRESHOLD`: Author search threshold (default: 0.4)
//! - `HOARD_SAGA_THRESHOLD`: Saga search threshold (default: 0.4)
//! - `HOARD_DEBOUNCE_MS`: Interactive search quiet period (default: 300)
//!
//! Unset variables keep their defaults; set but invalid ones are errors.

use std::str::FromStr;
use std::time::Duration;

use hoard_core::fuzzy::MatcherConfig;
use hoard_core::library::SearchThresholds;

use crate::error::{Error, Result};

pub const ENV_MIN_SCORE: &str = "HOARD_MIN_SCORE";
pub const ENV_SUGGEST_MIN_SCORE: &str = "HOARD_SUGGEST_MIN_SCORE";
pub const ENV_MAX_SUGGESTIONS: &str = "HOARD_MAX_SUGGESTIONS";
pub const ENV_BOOK_THRESHOLD: &str = "HOARD_BOOK_THRESHOLD";
pub const ENV_AUTHOR_THRESHOLD: &str = "HOARD_AUTHOR_THRESHOLD";
pub const ENV_SAGA_THRESHOLD: &str = "HOARD_SAGA_THRESHOLD";
pub const ENV_DEBOUNCE_MS: &str = "HOARD_DEBOUNCE_MS";

const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Everything that tunes a search session
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub matcher: MatcherConfig,
    pub thresholds: SearchThresholds,
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            thresholds: SearchThresholds::default(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl SearchSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(v) = score_var(&lookup, ENV_MIN_SCORE)? {
            settings.matcher.min_score = v;
        }
        if let Some(v) = score_var(&lookup, ENV_SUGGEST_MIN_SCORE)? {
            settings.matcher.suggest_min_score = v;
        }
        if let Some(v) = parsed_var::<usize>(&lookup, ENV_MAX_SUGGESTIONS)? {
            if v == 0 {
                return Err(Error::Config(format!("{ENV_MAX_SUGGESTIONS} must be at least 1")));
            }
            settings.matcher.max_suggestions = v;
        }
        if let Some(v) = score_var(&lookup, ENV_BOOK_THRESHOLD)? {
            settings.thresholds.books = v;
        }
        if let Some(v) = score_var(&lookup, ENV_AUTHOR_THRESHOLD)? {
            settings.thresholds.authors = v;
        }
        if let Some(v) = score_var(&lookup, ENV_SAGA_THRESHOLD)? {
            settings.thresholds.sagas = v;
        }
        if let Some(ms) = parsed_var::<u64>(&lookup, ENV_DEBOUNCE_MS)? {
            settings.debounce = Duration::from_millis(ms);
        }

        Ok(settings)
    }
}

fn parsed_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
    }
}

fn score_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<f64>> {
    match parsed_var::<f64>(lookup, key)? {
        Some(v) if !(0.0..=1.0).contains(&v) => {
            Err(Error::Config(format!("{key}={v} is outside 0.0-1.0")))
        }
        other => Ok(other),
    }
}
