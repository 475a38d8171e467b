use std::time::Instant;

use serde::Serialize;

use crate::comparison::{compare, ComparisonResult};
use crate::error::ForecastError;
use crate::metrics::{
    accuracy_score, evaluate, growth_summary, profit_margin, AccuracyReport, GrowthSummary,
};
use crate::series::{FinancialSnapshot, SeriesStore};
use crate::smoothing::holt;
use crate::smoothing::{Forecaster, SmoothingParams};
use crate::types::{with_metadata, Category, ComputationOutput};
use crate::ForecastResult;

/// Accuracy measures for one category, scored over the comparison
/// window.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryAccuracy {
    pub category: Category,
    pub report: AccuracyReport,
}

/// Best-fit damped-trend profile of one operating history. Computed
/// from the history itself, independent of the strategy used for the
/// projection.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySmoothing {
    pub category: Category,
    pub params: SmoothingParams,
    pub sse: f64,
    pub converged: bool,
}

/// Full pipeline output in one pass: the trailing actual window, the
/// forecast, their comparison, per-category accuracy, growth and margin
/// aggregates, and plain-text insights.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    pub months: usize,
    pub horizon: usize,
    pub actual: FinancialSnapshot,
    pub forecast: FinancialSnapshot,
    pub comparison: ComparisonResult,
    pub accuracy: Vec<CategoryAccuracy>,
    pub revenue_growth: GrowthSummary,
    pub actual_profit_margin_pct: f64,
    pub forecast_profit_margin_pct: f64,
    /// 100 minus the revenue percentage error over the window.
    pub forecast_accuracy_pct: f64,
    pub insights: Vec<String>,
    pub smoothing: Vec<CategorySmoothing>,
}

fn build_insights(
    revenue_variance_pct: f64,
    actual_margin: f64,
    forecast_margin: f64,
    accuracy_pct: f64,
) -> Vec<String> {
    let mut insights = Vec::new();
    if revenue_variance_pct > 10.0 {
        insights.push(format!(
            "Forecasted revenue shows strong growth of {revenue_variance_pct:.1}%, \
             indicating positive business momentum."
        ));
    } else if revenue_variance_pct < -5.0 {
        insights.push(format!(
            "Forecasted revenue is {:.1}% below actual, suggesting potential challenges ahead.",
            revenue_variance_pct.abs()
        ));
    }
    if forecast_margin > actual_margin {
        insights.push("Profit margins expected to improve".to_string());
    }
    if revenue_variance_pct > 5.0 {
        insights.push("Strong revenue growth projected".to_string());
    }
    insights.push("Monitor high-variance metrics closely".to_string());
    if accuracy_pct < 85.0 {
        insights.push("Improve forecasting accuracy".to_string());
    }
    if forecast_margin < 10.0 {
        insights.push("Focus on cost optimization".to_string());
    }
    insights.push("Regular forecast model validation needed".to_string());
    insights
}

/// Run the full forecast pipeline over a store.
///
/// The trailing `horizon` months of history form the actual window,
/// scored position-by-position against the `horizon` forecast months.
/// The window therefore needs at least `horizon` months of history.
pub fn build_overview(
    store: &SeriesStore,
    forecaster: &dyn Forecaster,
) -> ForecastResult<ComputationOutput<OverviewReport>> {
    let started = Instant::now();
    let mut warnings = Vec::new();

    let horizon = store.horizon();
    if horizon > store.months() {
        return Err(ForecastError::InvalidInput {
            field: "horizon".into(),
            reason: format!(
                "comparison window of {horizon} months exceeds the {} months of history",
                store.months()
            ),
        });
    }

    // Trailing window of actuals, same length as the forecast.
    let actual = FinancialSnapshot::derive(
        store.revenue().tail(horizon),
        store.cost_of_goods_sold().tail(horizon),
        store.operating_expenses().tail(horizon),
    )?;

    let forecast = FinancialSnapshot::derive(
        forecaster.forecast(store.revenue(), horizon)?,
        forecaster.forecast(store.cost_of_goods_sold(), horizon)?,
        forecaster.forecast(store.operating_expenses(), horizon)?,
    )?;

    let comparison = compare(&actual, &forecast)?;

    let mut accuracy = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let report = evaluate(
            actual.get(category)?.values(),
            forecast.get(category)?.values(),
        )?;
        if report.mape.is_nan() {
            warnings.push(format!(
                "{category}: percentage error undefined, every actual in the window is zero"
            ));
        } else if report.excluded_periods > 0 {
            warnings.push(format!(
                "{category}: {} of {horizon} window periods excluded from the percentage error \
                 (zero actuals)",
                report.excluded_periods
            ));
        }
        accuracy.push(CategoryAccuracy { category, report });
    }

    let actual_profit_margin_pct = profit_margin(
        actual.get(Category::Revenue)?,
        actual.get(Category::NetIncome)?,
    );
    let forecast_profit_margin_pct = profit_margin(
        forecast.get(Category::Revenue)?,
        forecast.get(Category::NetIncome)?,
    );
    let revenue_growth = growth_summary(store.revenue());

    let forecast_accuracy_pct = accuracy
        .iter()
        .find(|entry| entry.category == Category::Revenue)
        .map(|entry| accuracy_score(&entry.report))
        .unwrap_or(f64::NAN);
    let revenue_variance_pct = comparison
        .category(Category::Revenue)
        .map(|entry| entry.variance_pct)
        .unwrap_or(0.0);

    let insights = build_insights(
        revenue_variance_pct,
        actual_profit_margin_pct,
        forecast_profit_margin_pct,
        forecast_accuracy_pct,
    );

    let mut smoothing = Vec::with_capacity(Category::OPERATING.len());
    for category in Category::OPERATING {
        let fit = holt::fit(store.operating(category)?.values())?;
        if !fit.converged {
            warnings.push(format!(
                "{category}: smoothing parameter search stopped after {} iterations without \
                 reaching tolerance",
                fit.iterations
            ));
        }
        smoothing.push(CategorySmoothing {
            category,
            params: fit.params,
            sse: fit.sse,
            converged: fit.converged,
        });
    }

    let report = OverviewReport {
        months: store.months(),
        horizon,
        actual,
        forecast,
        comparison,
        accuracy,
        revenue_growth,
        actual_profit_margin_pct,
        forecast_profit_margin_pct,
        forecast_accuracy_pct,
        insights,
        smoothing,
    };

    let assumptions = serde_json::json!({
        "actual_window": "trailing history months, paired with the forecast by position",
        "forecast_model": "one strategy applied per operating category",
        "net_income": "derived from the operating categories on both sides",
        "horizon": horizon,
    });

    Ok(with_metadata(
        "Financial Forecast Overview",
        &assumptions,
        warnings,
        started.elapsed().as_micros() as u64,
        report,
    ))
}
