//! Scalar helpers with an explicit zero-denominator policy.
//!
//! Every ratio in this crate that can hit a zero denominator routes through
//! one of these helpers, and the caller states its fallback at the call
//! site: 0.0 where the business contract says "report zero", `f64::NAN`
//! where the statistic is undefined.

/// Percentage ratio `numerator / denominator * 100`, or `fallback` when the
/// denominator is zero.
pub fn pct_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator * 100.0
    }
}

/// Arithmetic mean, or `fallback` when the slice is empty.
pub fn mean_or(values: &[f64], fallback: f64) -> f64 {
    if values.is_empty() {
        fallback
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation, or `fallback` when the slice is empty.
pub fn std_dev_or(values: &[f64], fallback: f64) -> f64 {
    if values.is_empty() {
        return fallback;
    }
    let mean = mean_or(values, 0.0);
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
