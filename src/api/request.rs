//! Request types for the tax engine API.
//!
//! The `/api/tax/calculate` body deserializes directly into
//! [`TaxCalculationRequest`](crate::models::TaxCalculationRequest); this
//! module defines the query-string shapes for the comparison and history
//! endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Query parameters for `GET /api/tax/compare`.
///
/// `years` is a comma-separated ordered list of financial-year keys, e.g.
/// `?income=75000&years=2023-24,2024-25`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareParams {
    /// The taxable income to compare across years.
    pub income: Decimal,
    /// Comma-separated financial-year keys, compared in the order given.
    pub years: String,
}

impl CompareParams {
    /// Splits the `years` parameter into an ordered list of year keys,
    /// dropping empty segments.
    pub fn year_list(&self) -> Vec<String> {
        self.years
            .split(',')
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_history_years() -> u32 {
    5
}

/// Query parameters for `GET /api/tax/history/{income}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryParams {
    /// The number of most recent financial years to cover.
    #[serde(default = "default_history_years")]
    pub years: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_compare_params_split_years_in_order() {
        let params = CompareParams {
            income: Decimal::from_str("75000").unwrap(),
            years: "2023-24,2024-25".to_string(),
        };
        assert_eq!(
            params.year_list(),
            vec!["2023-24".to_string(), "2024-25".to_string()]
        );
    }

    #[test]
    fn test_compare_params_trim_whitespace_and_empty_segments() {
        let params = CompareParams {
            income: Decimal::from_str("75000").unwrap(),
            years: " 2024-25 ,,".to_string(),
        };
        assert_eq!(params.year_list(), vec!["2024-25".to_string()]);
    }

    #[test]
    fn test_history_params_default_years() {
        let params: HistoryParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.years, 5);
    }

    #[test]
    fn test_history_params_explicit_years() {
        let params: HistoryParams = serde_json::from_str(r#"{"years": 3}"#).unwrap();
        assert_eq!(params.years, 3);
    }
}
