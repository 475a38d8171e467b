//! Actual versus forecast variance analysis.

pub mod variance;

pub use variance::{
    analyze_comparison, compare, CategoryComparison, ComparisonInput, ComparisonResult,
};
