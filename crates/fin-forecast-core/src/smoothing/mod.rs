//! Exponential smoothing with additive damped trend.
//!
//! [`holt`] implements the state recursion and parameter fitting,
//! [`optimizer`] the bounded Nelder-Mead search behind it, and
//! [`forecaster`] the strategy trait plus the standalone analysis.

pub mod forecaster;
pub mod holt;
pub mod optimizer;

pub use forecaster::{
    run_forecast, DampedTrendForecaster, ForecastInput, ForecastOutput, Forecaster,
    NaiveForecaster,
};
pub use holt::{fit, fit_with, DampedTrendFit, SmoothingParams};
