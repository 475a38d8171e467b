use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::smoothing::optimizer::{self, NelderMead};
use crate::ForecastResult;

/// Below this distance from 1.0, phi is treated as exactly undamped.
const UNDAMPED_EPS: f64 = 1e-12;

/// Smoothing weights for the additive damped-trend model.
///
/// `alpha` weights the level update, `beta` the trend update, and `phi`
/// damps the trend. All three live in `[0, 1]`; `phi = 1` reduces to the
/// classic undamped Holt model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    pub alpha: f64,
    pub beta: f64,
    pub phi: f64,
}

impl SmoothingParams {
    pub fn validate(&self) -> ForecastResult<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("phi", self.phi)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidInput {
                    field: name.into(),
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        Ok(())
    }
}

/// Terminal state of a smoothing pass over a training series.
///
/// `level` and `trend` are the state after the last observation;
/// extrapolation continues from there. `iterations` and `converged`
/// describe the parameter search (zero and true when parameters were
/// supplied rather than fitted).
#[derive(Debug, Clone, Serialize)]
pub struct DampedTrendFit {
    pub params: SmoothingParams,
    pub level: f64,
    pub trend: f64,
    pub sse: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl DampedTrendFit {
    /// Point forecasts for steps `1..=horizon` past the training data.
    ///
    /// The step multiplier is the damped sum phi + phi^2 + ... + phi^h,
    /// which approaches a finite plateau for phi < 1 and grows linearly
    /// at phi = 1.
    pub fn extrapolate(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|h| self.level + self.trend * damping_sum(self.params.phi, h))
            .collect()
    }
}

fn damping_sum(phi: f64, h: usize) -> f64 {
    if (phi - 1.0).abs() < UNDAMPED_EPS {
        h as f64
    } else {
        let h = i32::try_from(h).unwrap_or(i32::MAX);
        phi * (1.0 - phi.powi(h)) / (1.0 - phi)
    }
}

struct SmoothedState {
    level: f64,
    trend: f64,
    sse: f64,
}

/// One smoothing pass. Level seeds from the first observation, trend from
/// the first difference; every later observation first scores the
/// one-step-ahead forecast, then updates the state. `None` means the
/// state left the finite range.
fn smooth(values: &[f64], params: &SmoothingParams) -> Option<SmoothedState> {
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut sse = 0.0;

    for &y in &values[1..] {
        let forecast = level + params.phi * trend;
        let err = y - forecast;
        sse += err * err;

        let prev_level = level;
        level = params.alpha * y + (1.0 - params.alpha) * (level + params.phi * trend);
        trend = params.beta * (level - prev_level) + (1.0 - params.beta) * params.phi * trend;

        if !level.is_finite() || !trend.is_finite() {
            return None;
        }
    }
    Some(SmoothedState { level, trend, sse })
}

fn validate_observations(values: &[f64]) -> ForecastResult<()> {
    if values.len() < 2 {
        return Err(ForecastError::InsufficientData(format!(
            "damped-trend fit needs at least 2 observations, got {}",
            values.len()
        )));
    }
    for (i, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ForecastError::InvalidInput {
                field: "values".into(),
                reason: format!("non-finite observation at index {i}"),
            });
        }
    }
    Ok(())
}

/// Fit smoothing parameters by minimizing the one-step-ahead sum of
/// squared errors over the box `[0, 1]^3`.
///
/// The search never fails: parameter sets that blow up the state score
/// as infinitely bad and are abandoned. Running out of iterations is
/// reported via `converged`, not an error.
pub fn fit(values: &[f64]) -> ForecastResult<DampedTrendFit> {
    validate_observations(values)?;

    let objective = |x: &[f64; 3]| {
        let params = SmoothingParams {
            alpha: x[0],
            beta: x[1],
            phi: x[2],
        };
        match smooth(values, &params) {
            Some(state) => state.sse,
            None => f64::INFINITY,
        }
    };

    let minimum = optimizer::minimize(
        objective,
        [0.5, 0.1, 1.0],
        [0.05, 0.05, 0.05],
        [(0.0, 1.0); 3],
        &NelderMead::default(),
    );

    let params = SmoothingParams {
        alpha: minimum.x[0],
        beta: minimum.x[1],
        phi: minimum.x[2],
    };
    let state = smooth(values, &params).ok_or_else(|| ForecastError::InvalidInput {
        field: "values".into(),
        reason: "smoothing state is non-finite at the fitted parameters".into(),
    })?;

    Ok(DampedTrendFit {
        params,
        level: state.level,
        trend: state.trend,
        sse: state.sse,
        iterations: minimum.iterations,
        converged: minimum.converged,
    })
}

/// Smoothing pass with fixed, caller-supplied parameters.
pub fn fit_with(values: &[f64], params: SmoothingParams) -> ForecastResult<DampedTrendFit> {
    validate_observations(values)?;
    params.validate()?;

    let state = smooth(values, &params).ok_or_else(|| ForecastError::InvalidInput {
        field: "values".into(),
        reason: "smoothing state is non-finite at the supplied parameters".into(),
    })?;

    Ok(DampedTrendFit {
        params,
        level: state.level,
        trend: state.trend,
        sse: state.sse,
        iterations: 0,
        converged: true,
    })
}
