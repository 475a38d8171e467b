mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::accuracy::AccuracyArgs;
use commands::compare::CompareArgs;
use commands::dataset::DatasetArgs;
use commands::forecast::ForecastArgs;
use commands::overview::OverviewArgs;

/// Financial forecasting and forecast-accuracy analytics
#[derive(Parser)]
#[command(
    name = "ffc",
    version,
    about = "Financial forecasting and forecast-accuracy analytics",
    long_about = "A CLI for monthly financial series: damped-trend exponential smoothing \
                  forecasts, accuracy scoring (MSE, RMSE, MAE, MAPE), actual-vs-forecast \
                  variance analysis, and a combined overview report over a generated \
                  or configured dataset."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a single monthly series with damped-trend smoothing
    Forecast(ForecastArgs),
    /// Score predictions against actuals (MSE, RMSE, MAE, MAPE)
    Accuracy(AccuracyArgs),
    /// Compare actual and forecast snapshots category by category
    Compare(CompareArgs),
    /// Run the full forecast overview over a dataset
    Overview(OverviewArgs),
    /// Generate the deterministic sample dataset
    Dataset(DatasetArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Forecast(args) => commands::forecast::run_forecast(args),
        Commands::Accuracy(args) => commands::accuracy::run_accuracy(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Overview(args) => commands::overview::run_overview(args),
        Commands::Dataset(args) => commands::dataset::run_dataset(args),
        Commands::Version => {
            println!("ffc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
