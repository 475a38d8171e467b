//! Derived financial metrics and forecast-accuracy evaluation.

pub mod accuracy;
pub mod derived;

pub use accuracy::{accuracy_score, analyze_accuracy, evaluate, AccuracyInput, AccuracyReport};
pub use derived::{
    growth_rate, growth_summary, net_income, profit_margin, GrowthSummary,
};
