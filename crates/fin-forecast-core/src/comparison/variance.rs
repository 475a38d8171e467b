use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::numeric::pct_or;
use crate::series::{FinancialSnapshot, TimeSeries};
use crate::types::{with_metadata, Category, ComputationOutput};
use crate::ForecastResult;

/// Actual versus forecast rollup for a single category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryComparison {
    pub category: Category,
    pub actual: TimeSeries,
    pub forecast: TimeSeries,
    pub total_actual: f64,
    pub total_forecast: f64,
    /// Forecast total minus actual total.
    pub variance: f64,
    /// Variance as a percentage of the actual total, 0 when that total
    /// is zero.
    pub variance_pct: f64,
}

/// Per-category comparison across all four categories, in reporting
/// order (revenue, COGS, OPEX, net income).
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub categories: Vec<CategoryComparison>,
}

impl ComparisonResult {
    pub fn category(&self, category: Category) -> Option<&CategoryComparison> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Align two snapshots category by category.
///
/// The actual and forecast series of a category may have different
/// lengths (history against a future horizon); only totals are compared,
/// never element-wise pairs.
pub fn compare(
    actual: &FinancialSnapshot,
    forecast: &FinancialSnapshot,
) -> ForecastResult<ComparisonResult> {
    let mut categories = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let actual_series = actual.get(category)?;
        let forecast_series = forecast.get(category)?;
        let total_actual = actual_series.sum();
        let total_forecast = forecast_series.sum();
        let variance = total_forecast - total_actual;
        categories.push(CategoryComparison {
            category,
            actual: actual_series.clone(),
            forecast: forecast_series.clone(),
            total_actual,
            total_forecast,
            variance,
            variance_pct: pct_or(variance, total_actual, 0.0),
        });
    }
    Ok(ComparisonResult { categories })
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Input for a standalone comparison run. Each side carries the three
/// operating categories as plain value arrays; net income is derived,
/// and a supplied net income entry is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    /// Month of the first observation on both sides. Labels do not
    /// affect totals.
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    pub actual: BTreeMap<Category, Vec<f64>>,
    pub forecast: BTreeMap<Category, Vec<f64>>,
}

fn snapshot_from_values(
    start: NaiveDate,
    values: &BTreeMap<Category, Vec<f64>>,
) -> ForecastResult<FinancialSnapshot> {
    let mut map = BTreeMap::new();
    for (&category, series) in values {
        map.insert(category, TimeSeries::monthly(start, series.clone())?);
    }
    FinancialSnapshot::from_map(map)
}

/// Variance analysis between an actual and a forecast snapshot.
pub fn analyze_comparison(
    input: &ComparisonInput,
) -> ForecastResult<ComputationOutput<ComparisonResult>> {
    let started = Instant::now();
    let mut warnings = Vec::new();

    let actual = snapshot_from_values(input.start, &input.actual)?;
    let forecast = snapshot_from_values(input.start, &input.forecast)?;
    let result = compare(&actual, &forecast)?;

    for entry in &result.categories {
        if entry.total_actual == 0.0 {
            warnings.push(format!(
                "{}: actual total is zero, variance percentage reported as 0",
                entry.category
            ));
        }
    }

    let assumptions = serde_json::json!({
        "variance": "forecast total minus actual total",
        "zero_actual_total": "variance percentage falls back to 0",
        "net_income": "derived from the operating categories on both sides",
    });

    Ok(with_metadata(
        "Actual vs Forecast Variance Analysis",
        &assumptions,
        warnings,
        started.elapsed().as_micros() as u64,
        result,
    ))
}
