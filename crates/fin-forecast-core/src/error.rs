use thiserror::Error;

use crate::types::Category;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid horizon: {horizon} (must forecast at least one period)")]
    InvalidHorizon { horizon: usize },

    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Missing category: {0}")]
    MissingCategory(Category),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ForecastError {
    fn from(e: serde_json::Error) -> Self {
        ForecastError::SerializationError(e.to_string())
    }
}
