use serde::Serialize;

use crate::error::ForecastError;
use crate::numeric::{mean_or, pct_or, std_dev_or};
use crate::series::TimeSeries;
use crate::ForecastResult;

/// Element-wise net income: revenue - cost of goods sold - operating
/// expenses. The three series must have equal length; periods are taken
/// from the revenue series.
pub fn net_income(
    revenue: &TimeSeries,
    cost_of_goods_sold: &TimeSeries,
    operating_expenses: &TimeSeries,
) -> ForecastResult<TimeSeries> {
    for (name, series) in [
        ("cost_of_goods_sold vs revenue", cost_of_goods_sold),
        ("operating_expenses vs revenue", operating_expenses),
    ] {
        if series.len() != revenue.len() {
            return Err(ForecastError::LengthMismatch {
                context: name.into(),
                expected: revenue.len(),
                actual: series.len(),
            });
        }
    }

    let values = revenue
        .values()
        .iter()
        .zip(cost_of_goods_sold.values())
        .zip(operating_expenses.values())
        .map(|((r, c), o)| r - c - o)
        .collect();
    Ok(TimeSeries::from_parts_unchecked(
        revenue.periods().to_vec(),
        values,
    ))
}

/// Month-over-month growth in percent, labeled with the later period.
///
/// Periods whose predecessor is zero are omitted rather than zero-filled,
/// so the result has `len - 1` observations minus the number of zero
/// predecessors. Empty for series shorter than 2.
pub fn growth_rate(series: &TimeSeries) -> TimeSeries {
    let mut periods = Vec::new();
    let mut values = Vec::new();
    for i in 1..series.len() {
        let prev = series.values()[i - 1];
        if prev == 0.0 {
            continue;
        }
        periods.push(series.periods()[i]);
        values.push((series.values()[i] - prev) / prev * 100.0);
    }
    TimeSeries::from_parts_unchecked(periods, values)
}

/// Net income as a percentage of revenue, over the whole span of both
/// series. Zero total revenue yields 0 rather than an error.
pub fn profit_margin(revenue: &TimeSeries, net_income: &TimeSeries) -> f64 {
    pct_or(net_income.sum(), revenue.sum(), 0.0)
}

/// Aggregate view of a growth-rate series.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthSummary {
    pub average_pct: f64,
    /// Population standard deviation of the growth rates.
    pub volatility_pct: f64,
    pub observations: usize,
}

/// Average growth and volatility for a series, both 0 when no growth
/// observations exist.
pub fn growth_summary(series: &TimeSeries) -> GrowthSummary {
    let growth = growth_rate(series);
    GrowthSummary {
        average_pct: mean_or(growth.values(), 0.0),
        volatility_pct: std_dev_or(growth.values(), 0.0),
        observations: growth.len(),
    }
}
