use std::fmt;

use serde::{Deserialize, Serialize};

/// Financial statement categories tracked by the forecasting core.
///
/// `NetIncome` is always derived from the three operating categories,
/// never supplied independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Revenue,
    CostOfGoodsSold,
    OperatingExpenses,
    NetIncome,
}

impl Category {
    /// All four categories in reporting order.
    pub const ALL: [Category; 4] = [
        Category::Revenue,
        Category::CostOfGoodsSold,
        Category::OperatingExpenses,
        Category::NetIncome,
    ];

    /// The three input categories. Net income is derived from these.
    pub const OPERATING: [Category; 3] = [
        Category::Revenue,
        Category::CostOfGoodsSold,
        Category::OperatingExpenses,
    ];

    /// Human-readable label, e.g. "Cost of Goods Sold".
    pub fn label(&self) -> &'static str {
        match self {
            Category::Revenue => "Revenue",
            Category::CostOfGoodsSold => "Cost of Goods Sold",
            Category::OperatingExpenses => "Operating Expenses",
            Category::NetIncome => "Net Income",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "ieee754_f64".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_and_labels() {
        assert_eq!(Category::ALL.len(), 4);
        assert_eq!(Category::ALL[0], Category::Revenue);
        assert_eq!(Category::ALL[3], Category::NetIncome);
        assert_eq!(Category::OPERATING.len(), 3);
        assert!(!Category::OPERATING.contains(&Category::NetIncome));
        assert_eq!(Category::CostOfGoodsSold.label(), "Cost of Goods Sold");
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&Category::OperatingExpenses).unwrap();
        assert_eq!(json, "\"operating_expenses\"");
        let back: Category = serde_json::from_str("\"net_income\"").unwrap();
        assert_eq!(back, Category::NetIncome);
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata("Test Methodology", &serde_json::json!({"h": 3}), vec![], 42, 1.5);
        assert_eq!(out.result, 1.5);
        assert_eq!(out.methodology, "Test Methodology");
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.metadata.precision, "ieee754_f64");
        assert!(out.warnings.is_empty());
    }
}
