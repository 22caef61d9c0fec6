//! Batch min-max rescaling of plan scores.

use tracing::warn;

/// Rescales `scores` to `(s - min) / (max - min)`.
///
/// When every score is identical the range is empty and each score maps to 0.0.
pub fn min_max(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = max - min;

    if width == 0.0 {
        warn!(
            plans = scores.len(),
            score = min,
            "all plan scores are identical; normalized scores default to 0"
        );
        return vec![0.0; scores.len()];
    }

    scores.iter().map(|score| (score - min) / width).collect()
}
