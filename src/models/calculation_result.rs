//! Calculation request and result models.
//!
//! Requests and results are ephemeral: created per call and owned by the
//! caller. Reference data (brackets, offsets, levies) is never mutated by the
//! engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for a single-year tax calculation.
///
/// # Example
///
/// ```
/// use tax_engine::models::TaxCalculationRequest;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let request = TaxCalculationRequest {
///     taxable_income: Decimal::from_str("50000").unwrap(),
///     financial_year: "2024-25".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationRequest {
    /// The taxable income to compute liability for. Must be non-negative.
    pub taxable_income: Decimal,
    /// The financial year key identifying a known bracket table.
    pub financial_year: String,
}

/// The complete result of a tax calculation for one financial year.
///
/// `net_tax_payable = max(0, gross_tax - total_offsets + total_levies)`,
/// rounded to 2 decimal places at this final boundary only.
///
/// # Example
///
/// ```
/// use tax_engine::models::TaxCalculationResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = TaxCalculationResult {
///     financial_year: "2024-25".to_string(),
///     taxable_income: Decimal::from_str("50000").unwrap(),
///     gross_tax: Decimal::from_str("5787.70").unwrap(),
///     total_offsets: Decimal::ZERO,
///     total_levies: Decimal::ZERO,
///     net_tax_payable: Decimal::from_str("5787.70").unwrap(),
///     effective_rate: Decimal::from_str("0.1158").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// The financial year the calculation was performed against.
    pub financial_year: String,
    /// The taxable income echoed back from the request.
    pub taxable_income: Decimal,
    /// Progressive tax from brackets alone, before adjustments.
    pub gross_tax: Decimal,
    /// Sum of all eligible offsets.
    pub total_offsets: Decimal,
    /// Sum of all applicable levies.
    pub total_levies: Decimal,
    /// Final liability after adjustments, floored at zero.
    pub net_tax_payable: Decimal,
    /// `net_tax_payable / taxable_income`, zero when income is zero.
    pub effective_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "taxable_income": "50000",
            "financial_year": "2024-25"
        }"#;

        let request: TaxCalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.taxable_income, dec("50000"));
        assert_eq!(request.financial_year, "2024-25");
    }

    #[test]
    fn test_request_accepts_numeric_income() {
        // Decimal deserializes from JSON numbers as well as strings.
        let json = r#"{"taxable_income": 50000, "financial_year": "2024-25"}"#;
        let request: TaxCalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.taxable_income, dec("50000"));
    }

    #[test]
    fn test_result_serializes_money_as_strings() {
        let result = TaxCalculationResult {
            financial_year: "2024-25".to_string(),
            taxable_income: dec("50000"),
            gross_tax: dec("5787.70"),
            total_offsets: Decimal::ZERO,
            total_levies: Decimal::ZERO,
            net_tax_payable: dec("5787.70"),
            effective_rate: dec("0.1158"),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["net_tax_payable"], "5787.70");
        assert_eq!(json["financial_year"], "2024-25");
    }
}
