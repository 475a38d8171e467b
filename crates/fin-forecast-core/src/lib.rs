//! # Fin Forecast Core
//!
//! Financial forecasting and forecast-accuracy analytics over monthly
//! series. The crate covers damped-trend exponential smoothing with
//! fitted parameters, derived profitability metrics, accuracy scoring
//! of forecasts against actuals, actual-versus-forecast comparison,
//! synthetic dataset generation, and a combined overview report.
//!
//! ## Feature Flags
//!
//! - `smoothing`: exponential smoothing forecaster (default)
//! - `metrics`: derived metrics and accuracy evaluation (default)
//! - `comparison`: actual vs forecast comparison
//! - `dataset`: deterministic sample dataset generation
//! - `overview`: combined forecast overview report
//! - `full`: everything

pub mod error;
pub mod numeric;
pub mod series;
pub mod types;

#[cfg(feature = "smoothing")]
pub mod smoothing;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "dataset")]
pub mod dataset;

#[cfg(feature = "overview")]
pub mod overview;

pub use error::ForecastError;
pub use series::{FinancialSnapshot, SeriesStore, TimeSeries};
pub use types::*;

/// Standard result type for all forecasting operations
pub type ForecastResult<T> = Result<T, ForecastError>;
