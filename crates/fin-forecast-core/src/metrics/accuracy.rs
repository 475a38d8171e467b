use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::numeric::mean_or;
use crate::types::{with_metadata, ComputationOutput};
use crate::ForecastResult;

/// Forecast-accuracy measures for one actual/predicted pairing.
///
/// Pairs are matched by position, so the two sequences may carry
/// different period labels (a trailing actual window scored against a
/// future forecast window, for example).
#[derive(Debug, Clone, Serialize)]
pub struct AccuracyReport {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    /// Mean absolute percentage error over pairs with a nonzero actual.
    /// NaN when every actual is zero; serializes as null.
    pub mape: f64,
    /// Pairs dropped from the percentage error mean because the actual
    /// was zero.
    pub excluded_periods: usize,
}

/// Score `predicted` against `actual`, pair by pair.
///
/// Zero actuals are excluded from the percentage error rather than
/// substituted, and the exclusion count is reported so a shrunken
/// denominator is visible to the caller.
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> ForecastResult<AccuracyReport> {
    if actual.is_empty() && predicted.is_empty() {
        return Err(ForecastError::InsufficientData(
            "accuracy evaluation needs at least 1 paired period".into(),
        ));
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::LengthMismatch {
            context: "predicted vs actual".into(),
            expected: actual.len(),
            actual: predicted.len(),
        });
    }
    for (name, values) in [("actual", actual), ("predicted", predicted)] {
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidInput {
                field: name.into(),
                reason: format!("non-finite value at index {i}"),
            });
        }
    }

    let n = actual.len() as f64;
    let mut sq_sum = 0.0;
    let mut abs_sum = 0.0;
    let mut pct_terms = Vec::with_capacity(actual.len());
    let mut excluded = 0;

    for (&a, &p) in actual.iter().zip(predicted) {
        let err = a - p;
        sq_sum += err * err;
        abs_sum += err.abs();
        if a == 0.0 {
            excluded += 1;
        } else {
            pct_terms.push((err / a).abs());
        }
    }

    let mse = sq_sum / n;
    Ok(AccuracyReport {
        mse,
        rmse: mse.sqrt(),
        mae: abs_sum / n,
        mape: mean_or(&pct_terms, f64::NAN) * 100.0,
        excluded_periods: excluded,
    })
}

/// Headline accuracy: 100 minus the percentage error. An undefined
/// percentage error (all-zero actuals) propagates as NaN.
pub fn accuracy_score(report: &AccuracyReport) -> f64 {
    100.0 - report.mape
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyInput {
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
}

/// Accuracy evaluation with warnings about excluded periods.
pub fn analyze_accuracy(
    input: &AccuracyInput,
) -> ForecastResult<ComputationOutput<AccuracyReport>> {
    let started = Instant::now();
    let mut warnings = Vec::new();

    let report = evaluate(&input.actual, &input.predicted)?;
    if report.mape.is_nan() {
        warnings.push(
            "every actual value is zero, so the percentage error is undefined".to_string(),
        );
    } else if report.excluded_periods > 0 {
        warnings.push(format!(
            "{} of {} periods excluded from the percentage error (zero actuals)",
            report.excluded_periods,
            input.actual.len()
        ));
    }

    let assumptions = serde_json::json!({
        "pairing": "positional",
        "mape_policy": "periods with zero actuals are excluded, not substituted",
        "periods": input.actual.len(),
    });

    Ok(with_metadata(
        "Forecast Accuracy Evaluation",
        &assumptions,
        warnings,
        started.elapsed().as_micros() as u64,
        report,
    ))
}
