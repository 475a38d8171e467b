use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use fin_forecast_core::smoothing::{self, ForecastInput};

use crate::input;

/// Arguments for a single-series forecast
#[derive(Args)]
pub struct ForecastArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated monthly values (e.g. "100000,101500,103000")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<f64>>,

    /// Number of months to forecast (overrides the input file)
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Month of the first observation, YYYY-MM-DD (overrides the input file)
    #[arg(long)]
    pub start: Option<NaiveDate>,
}

pub fn run_forecast(args: ForecastArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut forecast_input: ForecastInput = if let Some(ref values) = args.values {
        let horizon = args
            .horizon
            .ok_or("--horizon is required when forecasting from --values")?;
        ForecastInput {
            values: values.clone(),
            start: args
                .start
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()),
            horizon,
            params: None,
        }
    } else if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--values, --input <file.json>, or stdin required for forecasting".into());
    };

    if let Some(horizon) = args.horizon {
        forecast_input.horizon = horizon;
    }
    if let Some(start) = args.start {
        forecast_input.start = start;
    }

    let result = smoothing::run_forecast(&forecast_input)?;
    Ok(serde_json::to_value(result)?)
}
