use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::series::{FinancialSnapshot, SeriesStore, TimeSeries};
use crate::ForecastResult;

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

fn default_months() -> usize {
    60
}

fn default_horizon() -> usize {
    24
}

fn default_revenue() -> LinearSchedule {
    LinearSchedule {
        base: 100_000.0,
        step: 1_500.0,
    }
}

fn default_cost_of_goods_sold() -> LinearSchedule {
    LinearSchedule {
        base: 50_000.0,
        step: 800.0,
    }
}

fn default_operating_expenses() -> LinearSchedule {
    LinearSchedule {
        base: 20_000.0,
        step: 600.0,
    }
}

/// Arithmetic progression: `base + step * i` for month index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSchedule {
    pub base: f64,
    pub step: f64,
}

impl LinearSchedule {
    fn values(&self, months: usize) -> Vec<f64> {
        (0..months)
            .map(|i| self.base + self.step * i as f64)
            .collect()
    }
}

/// Deterministic sample dataset configuration. Every field has a
/// default, so `{}` deserializes to the reference dataset: 60 months
/// from January 2020, a 24 month horizon, and linear operating
/// schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    #[serde(default = "default_months")]
    pub months: usize,
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_revenue")]
    pub revenue: LinearSchedule,
    #[serde(default = "default_cost_of_goods_sold")]
    pub cost_of_goods_sold: LinearSchedule,
    #[serde(default = "default_operating_expenses")]
    pub operating_expenses: LinearSchedule,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            start: default_start(),
            months: default_months(),
            horizon: default_horizon(),
            revenue: default_revenue(),
            cost_of_goods_sold: default_cost_of_goods_sold(),
            operating_expenses: default_operating_expenses(),
        }
    }
}

/// Materialize the configured history and its static budget.
///
/// The budget is the same linear plan as the history, so actuals track
/// budget exactly in the reference dataset; divergence only appears with
/// customized schedules.
pub fn build_store(config: &DatasetConfig) -> ForecastResult<SeriesStore> {
    if config.months < 2 {
        return Err(ForecastError::InsufficientData(format!(
            "dataset needs at least 2 months of history, got {}",
            config.months
        )));
    }

    let revenue = TimeSeries::monthly(config.start, config.revenue.values(config.months))?;
    let cogs = TimeSeries::monthly(
        config.start,
        config.cost_of_goods_sold.values(config.months),
    )?;
    let opex = TimeSeries::monthly(
        config.start,
        config.operating_expenses.values(config.months),
    )?;

    let budget = FinancialSnapshot::derive(revenue.clone(), cogs.clone(), opex.clone())?;
    SeriesStore::new(revenue, cogs, opex, budget, config.horizon)
}
