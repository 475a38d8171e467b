use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::ForecastError;
use crate::types::Category;
use crate::ForecastResult;

// ---------------------------------------------------------------------------
// TimeSeries
// ---------------------------------------------------------------------------

/// An ordered sequence of monthly observations.
///
/// Periods are month-end dates, strictly increasing, one per value.
/// Historical series are immutable once constructed; forecast and derived
/// series are newly created outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    periods: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series of consecutive month-end periods, starting with the
    /// month of `start`.
    pub fn monthly(start: NaiveDate, values: Vec<f64>) -> ForecastResult<Self> {
        let mut periods = Vec::with_capacity(values.len());
        for i in 0..values.len() {
            periods.push(month_end(add_months(start, i)?)?);
        }
        Ok(TimeSeries { periods, values })
    }

    /// Build a series from explicit periods and values.
    pub fn from_parts(periods: Vec<NaiveDate>, values: Vec<f64>) -> ForecastResult<Self> {
        if periods.len() != values.len() {
            return Err(ForecastError::LengthMismatch {
                context: "time series periods vs values".into(),
                expected: periods.len(),
                actual: values.len(),
            });
        }
        for pair in periods.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::InvalidInput {
                    field: "periods".into(),
                    reason: format!(
                        "periods must be strictly increasing ({} does not follow {})",
                        pair[1], pair[0]
                    ),
                });
            }
        }
        Ok(TimeSeries { periods, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn last_period(&self) -> Option<NaiveDate> {
        self.periods.last().copied()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// The trailing `n` observations (the whole series when `n` exceeds it).
    pub fn tail(&self, n: usize) -> TimeSeries {
        let skip = self.len().saturating_sub(n);
        TimeSeries {
            periods: self.periods[skip..].to_vec(),
            values: self.values[skip..].to_vec(),
        }
    }

    /// The `n` month-end periods immediately after the last observation.
    /// These label a forecast of horizon `n`.
    pub fn continuation(&self, n: usize) -> ForecastResult<Vec<NaiveDate>> {
        let last = self.last_period().ok_or_else(|| {
            ForecastError::InsufficientData(
                "cannot extend an empty series with forecast periods".into(),
            )
        })?;
        let mut periods = Vec::with_capacity(n);
        for i in 1..=n {
            periods.push(month_end(add_months(last, i)?)?);
        }
        Ok(periods)
    }

    /// Construction from parts already known to be aligned and ordered,
    /// e.g. a filtered subset of an existing series.
    pub(crate) fn from_parts_unchecked(periods: Vec<NaiveDate>, values: Vec<f64>) -> TimeSeries {
        TimeSeries { periods, values }
    }

    /// Periods and lengths must match for series that share an axis.
    pub(crate) fn ensure_same_shape(
        &self,
        other: &TimeSeries,
        context: &str,
    ) -> ForecastResult<()> {
        if self.len() != other.len() {
            return Err(ForecastError::LengthMismatch {
                context: context.into(),
                expected: self.len(),
                actual: other.len(),
            });
        }
        if self.periods != other.periods {
            return Err(ForecastError::InvalidInput {
                field: context.into(),
                reason: "series must share the same periods".into(),
            });
        }
        Ok(())
    }
}

fn add_months(date: NaiveDate, months: usize) -> ForecastResult<NaiveDate> {
    let months = u32::try_from(months).map_err(|_| {
        ForecastError::DateError(format!("month offset {months} out of range"))
    })?;
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        ForecastError::DateError(format!("month arithmetic overflow from {date}"))
    })
}

/// Last day of the month containing `date`.
fn month_end(date: NaiveDate) -> ForecastResult<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .ok_or_else(|| ForecastError::DateError(format!("invalid month start for {date}")))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| ForecastError::DateError(format!("month arithmetic overflow from {date}")))?;
    next.pred_opt()
        .ok_or_else(|| ForecastError::DateError(format!("no predecessor day for {next}")))
}

// ---------------------------------------------------------------------------
// FinancialSnapshot
// ---------------------------------------------------------------------------

/// Category-to-series mapping with net income always derived.
///
/// NetIncome[i] = Revenue[i] - CostOfGoodsSold[i] - OperatingExpenses[i]
/// for every period, enforced at construction. There is no way to set net
/// income independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    series: BTreeMap<Category, TimeSeries>,
}

impl FinancialSnapshot {
    /// Build a snapshot from the three operating series, deriving net income.
    pub fn derive(
        revenue: TimeSeries,
        cost_of_goods_sold: TimeSeries,
        operating_expenses: TimeSeries,
    ) -> ForecastResult<Self> {
        revenue.ensure_same_shape(&cost_of_goods_sold, "cost_of_goods_sold vs revenue")?;
        revenue.ensure_same_shape(&operating_expenses, "operating_expenses vs revenue")?;

        let net_values: Vec<f64> = revenue
            .values()
            .iter()
            .zip(cost_of_goods_sold.values())
            .zip(operating_expenses.values())
            .map(|((r, c), o)| r - c - o)
            .collect();
        let net_income = TimeSeries {
            periods: revenue.periods().to_vec(),
            values: net_values,
        };

        let mut series = BTreeMap::new();
        series.insert(Category::Revenue, revenue);
        series.insert(Category::CostOfGoodsSold, cost_of_goods_sold);
        series.insert(Category::OperatingExpenses, operating_expenses);
        series.insert(Category::NetIncome, net_income);
        Ok(FinancialSnapshot { series })
    }

    /// Build a snapshot from a category map, e.g. deserialized input.
    ///
    /// The three operating categories are required; any supplied net income
    /// entry is discarded and re-derived.
    pub fn from_map(mut map: BTreeMap<Category, TimeSeries>) -> ForecastResult<Self> {
        let mut take = |category: Category| {
            map.remove(&category)
                .ok_or(ForecastError::MissingCategory(category))
        };
        let revenue = take(Category::Revenue)?;
        let cogs = take(Category::CostOfGoodsSold)?;
        let opex = take(Category::OperatingExpenses)?;
        FinancialSnapshot::derive(revenue, cogs, opex)
    }

    pub fn get(&self, category: Category) -> ForecastResult<&TimeSeries> {
        self.series
            .get(&category)
            .ok_or(ForecastError::MissingCategory(category))
    }

    /// Number of periods covered (identical across categories).
    pub fn period_count(&self) -> usize {
        self.series.values().next().map_or(0, TimeSeries::len)
    }
}

// ---------------------------------------------------------------------------
// SeriesStore
// ---------------------------------------------------------------------------

/// Historical operating series, the static budget projection, and the
/// forecast horizon. Pure data, constructed once from configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesStore {
    revenue: TimeSeries,
    cost_of_goods_sold: TimeSeries,
    operating_expenses: TimeSeries,
    budget: FinancialSnapshot,
    horizon: usize,
}

impl SeriesStore {
    pub fn new(
        revenue: TimeSeries,
        cost_of_goods_sold: TimeSeries,
        operating_expenses: TimeSeries,
        budget: FinancialSnapshot,
        horizon: usize,
    ) -> ForecastResult<Self> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { horizon });
        }
        revenue.ensure_same_shape(&cost_of_goods_sold, "cost_of_goods_sold vs revenue")?;
        revenue.ensure_same_shape(&operating_expenses, "operating_expenses vs revenue")?;
        if budget.period_count() != revenue.len() {
            return Err(ForecastError::LengthMismatch {
                context: "budget snapshot vs history".into(),
                expected: revenue.len(),
                actual: budget.period_count(),
            });
        }
        Ok(SeriesStore {
            revenue,
            cost_of_goods_sold,
            operating_expenses,
            budget,
            horizon,
        })
    }

    /// Historical series for an operating category. Net income is not
    /// stored; it is derived per snapshot.
    pub fn operating(&self, category: Category) -> ForecastResult<&TimeSeries> {
        match category {
            Category::Revenue => Ok(&self.revenue),
            Category::CostOfGoodsSold => Ok(&self.cost_of_goods_sold),
            Category::OperatingExpenses => Ok(&self.operating_expenses),
            Category::NetIncome => Err(ForecastError::MissingCategory(category)),
        }
    }

    pub fn revenue(&self) -> &TimeSeries {
        &self.revenue
    }

    pub fn cost_of_goods_sold(&self) -> &TimeSeries {
        &self.cost_of_goods_sold
    }

    pub fn operating_expenses(&self) -> &TimeSeries {
        &self.operating_expenses
    }

    pub fn budget(&self) -> &FinancialSnapshot {
        &self.budget
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of historical months held.
    pub fn months(&self) -> usize {
        self.revenue.len()
    }
}
