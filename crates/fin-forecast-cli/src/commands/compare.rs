use clap::Args;
use serde_json::Value;

use fin_forecast_core::comparison::{self, ComparisonInput};

use crate::input;

/// Arguments for actual vs forecast variance analysis
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input: ComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for comparison".into());
    };

    let result = comparison::analyze_comparison(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}
