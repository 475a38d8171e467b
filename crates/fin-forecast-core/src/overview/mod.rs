//! Combined forecast overview: one pass producing the comparison,
//! accuracy, growth, margin, and insight outputs together.

pub mod report;

pub use report::{
    build_overview, CategoryAccuracy, CategorySmoothing, OverviewReport,
};
