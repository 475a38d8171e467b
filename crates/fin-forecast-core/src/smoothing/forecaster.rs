use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::series::TimeSeries;
use crate::smoothing::holt::{self, SmoothingParams};
use crate::types::{with_metadata, ComputationOutput};
use crate::ForecastResult;

/// A forecasting strategy over a single monthly series.
///
/// Implementations may require a minimum history length; all of them
/// reject a zero horizon before looking at the data.
pub trait Forecaster {
    /// Produce point forecasts for the `horizon` periods after `history`.
    /// The result has exactly `horizon` observations, labeled with the
    /// month-ends that continue the history.
    fn forecast(&self, history: &TimeSeries, horizon: usize) -> ForecastResult<TimeSeries>;
}

/// Damped-trend exponential smoothing, parameters fitted per series
/// unless fixed ones are supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampedTrendForecaster {
    pub params: Option<SmoothingParams>,
}

impl DampedTrendForecaster {
    pub fn with_params(params: SmoothingParams) -> Self {
        DampedTrendForecaster {
            params: Some(params),
        }
    }

    fn fit(&self, values: &[f64]) -> ForecastResult<holt::DampedTrendFit> {
        match self.params {
            Some(params) => holt::fit_with(values, params),
            None => holt::fit(values),
        }
    }
}

impl Forecaster for DampedTrendForecaster {
    fn forecast(&self, history: &TimeSeries, horizon: usize) -> ForecastResult<TimeSeries> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { horizon });
        }
        let fit = self.fit(history.values())?;
        TimeSeries::from_parts(history.continuation(horizon)?, fit.extrapolate(horizon))
    }
}

/// Repeats the last observation. Usable from a single data point, which
/// makes it the substitute when a history is too short for trend fitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveForecaster;

impl Forecaster for NaiveForecaster {
    fn forecast(&self, history: &TimeSeries, horizon: usize) -> ForecastResult<TimeSeries> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { horizon });
        }
        let last = history.values().last().copied().ok_or_else(|| {
            ForecastError::InsufficientData(
                "naive forecast needs at least 1 observation".into(),
            )
        })?;
        TimeSeries::from_parts(history.continuation(horizon)?, vec![last; horizon])
    }
}

// ---------------------------------------------------------------------------
// Standalone forecast analysis
// ---------------------------------------------------------------------------

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Input for a single-series forecast run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastInput {
    /// Historical observations, one per month.
    pub values: Vec<f64>,
    /// Month of the first observation.
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    /// Number of months to forecast.
    pub horizon: usize,
    /// Fixed smoothing parameters; omit to fit them to the history.
    #[serde(default)]
    pub params: Option<SmoothingParams>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastOutput {
    pub forecast: TimeSeries,
    pub params: SmoothingParams,
    pub level: f64,
    pub trend: f64,
    pub sse: f64,
    pub training_periods: usize,
}

/// Fit and extrapolate one series, with full diagnostics.
pub fn run_forecast(input: &ForecastInput) -> ForecastResult<ComputationOutput<ForecastOutput>> {
    let started = Instant::now();
    let mut warnings = Vec::new();

    if input.horizon == 0 {
        return Err(ForecastError::InvalidHorizon { horizon: 0 });
    }
    let history = TimeSeries::monthly(input.start, input.values.clone())?;

    let fit = match input.params {
        Some(params) => holt::fit_with(history.values(), params)?,
        None => holt::fit(history.values())?,
    };
    if !fit.converged {
        warnings.push(format!(
            "parameter search stopped after {} iterations without reaching tolerance",
            fit.iterations
        ));
    }

    let forecast = TimeSeries::from_parts(
        history.continuation(input.horizon)?,
        fit.extrapolate(input.horizon),
    )?;
    let output = ForecastOutput {
        forecast,
        params: fit.params,
        level: fit.level,
        trend: fit.trend,
        sse: fit.sse,
        training_periods: history.len(),
    };

    let assumptions = serde_json::json!({
        "model": "additive damped trend",
        "parameter_bounds": "alpha, beta, phi in [0, 1]",
        "parameters_fitted": input.params.is_none(),
        "horizon": input.horizon,
    });

    Ok(with_metadata(
        "Damped-Trend Exponential Smoothing (Holt)",
        &assumptions,
        warnings,
        started.elapsed().as_micros() as u64,
        output,
    ))
}
