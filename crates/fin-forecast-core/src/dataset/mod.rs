//! Deterministic sample dataset generation.

pub mod generate;

pub use generate::{build_store, DatasetConfig, LinearSchedule};
