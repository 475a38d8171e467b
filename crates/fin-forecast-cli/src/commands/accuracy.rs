use clap::Args;
use serde_json::Value;

use fin_forecast_core::metrics::{self, AccuracyInput};

use crate::input;

/// Arguments for forecast accuracy evaluation
#[derive(Args)]
pub struct AccuracyArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated actual values
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub actual: Option<Vec<f64>>,

    /// Comma-separated predicted values (paired with --actual)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub predicted: Option<Vec<f64>>,
}

pub fn run_accuracy(args: AccuracyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let accuracy_input: AccuracyInput = match (args.actual, args.predicted) {
        (Some(actual), Some(predicted)) => AccuracyInput { actual, predicted },
        (Some(_), None) | (None, Some(_)) => {
            return Err("--actual and --predicted must be supplied together".into());
        }
        (None, None) => {
            if let Some(ref path) = args.input {
                input::file::read_json(path)?
            } else if let Some(data) = input::stdin::read_stdin()? {
                serde_json::from_value(data)?
            } else {
                return Err(
                    "--actual/--predicted, --input <file.json>, or stdin required for accuracy"
                        .into(),
                );
            }
        }
    };

    let result = metrics::analyze_accuracy(&accuracy_input)?;
    Ok(serde_json::to_value(result)?)
}
