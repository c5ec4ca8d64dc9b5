//! Edit distance helpers

use strsim::levenshtein;

/// Levenshtein distance in characters.
#[inline]
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// `1 - distance / max_len`, in [0.0, 1.0]. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Like [`similarity_ratio`] but returns `None` when the ratio is below `floor`.
///
/// Skips the DP table when the length gap alone already rules out `floor`:
/// the distance is never smaller than `|len a - len b|`.
pub fn similarity_at_least(a: &str, b: &str, floor: f64) -> Option<f64> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return Some(1.0);
    }

    let gap = len_a.abs_diff(len_b) as f64;
    // Small epsilon keeps the shortcut strictly conservative
    if gap > (1.0 - floor) * max_len as f64 + 1e-9 {
        return None;
    }

    let ratio = 1.0 - edit_distance(a, b) as f64 / max_len as f64;
    (ratio >= floor).then_some(ratio)
}
