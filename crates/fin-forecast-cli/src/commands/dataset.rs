use clap::Args;
use serde_json::Value;

use fin_forecast_core::dataset::{self, DatasetConfig};

use crate::input;

/// Arguments for sample dataset generation
#[derive(Args)]
pub struct DatasetArgs {
    /// Path to a dataset config file (JSON or YAML); defaults when omitted
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_dataset(args: DatasetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config: DatasetConfig = if let Some(ref path) = args.config {
        input::file::read_config(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DatasetConfig::default()
    };

    let store = dataset::build_store(&config)?;
    Ok(serde_json::to_value(store)?)
}
