//! Guarded arithmetic helpers
//!
//! Empty inputs and zero denominators yield 0 instead of NaN or infinity.

use statrs::statistics::Statistics;

/// Arithmetic mean; 0 for an empty slice
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// `numerator / denominator`, or 0 when the denominator is exactly zero
#[inline]
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Share of `part` in `total` as a percentage; 0 when `total` is zero
#[inline]
pub fn share_pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Leading `window` entries of a series (the whole series if shorter)
#[inline(always)]
pub fn window<T>(series: &[T], window: usize) -> &[T] {
    &series[..series.len().min(window)]
}
