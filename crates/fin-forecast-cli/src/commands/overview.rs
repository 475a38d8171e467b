use clap::Args;
use serde_json::Value;

use fin_forecast_core::dataset::{self, DatasetConfig};
use fin_forecast_core::overview;
use fin_forecast_core::smoothing::{DampedTrendForecaster, Forecaster, NaiveForecaster};

use crate::input;

/// Arguments for the full forecast overview report
#[derive(Args)]
pub struct OverviewArgs {
    /// Path to a dataset config file (JSON or YAML); defaults when omitted
    #[arg(long)]
    pub config: Option<String>,

    /// Use the naive last-value forecaster instead of damped-trend smoothing
    #[arg(long)]
    pub naive: bool,
}

pub fn run_overview(args: OverviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config: DatasetConfig = if let Some(ref path) = args.config {
        input::file::read_config(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DatasetConfig::default()
    };

    let store = dataset::build_store(&config)?;
    let forecaster: Box<dyn Forecaster> = if args.naive {
        Box::new(NaiveForecaster)
    } else {
        Box::new(DampedTrendForecaster::default())
    };

    let result = overview::build_overview(&store, forecaster.as_ref())?;
    Ok(serde_json::to_value(result)?)
}
