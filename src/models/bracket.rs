//! The marginal-rate bracket model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate band for one financial year.
///
/// A bracket taxes income from `min_income` upward at `tax_rate`, on top of
/// `fixed_amount`, the cumulative tax from all lower brackets. `max_income`
/// records the published inclusive ceiling of the band; resolution treats a
/// bracket as ending where the next one starts, so fractional incomes
/// between published integer boundaries belong to the lower bracket. The
/// top bracket of a year has `max_income: None` (unbounded).
///
/// For one year's active brackets, ordered by `bracket_order`, the ranges are
/// contiguous and non-overlapping and exactly one bracket is unbounded. Tables
/// that violate this are rejected as corrupt reference data, not computed
/// against.
///
/// # Example
///
/// ```
/// use tax_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     financial_year: "2024-25".to_string(),
///     min_income: Decimal::from_str("45001").unwrap(),
///     max_income: Some(Decimal::from_str("135000").unwrap()),
///     tax_rate: Decimal::from_str("0.30").unwrap(),
///     fixed_amount: Decimal::from_str("4288").unwrap(),
///     bracket_order: 3,
///     is_active: true,
/// };
/// assert_eq!(bracket.max_income, Some(Decimal::from_str("135000").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The financial year this bracket belongs to (e.g., "2024-25").
    pub financial_year: String,
    /// The lowest income taxed by this bracket (inclusive).
    pub min_income: Decimal,
    /// The highest income taxed by this bracket (inclusive), or `None` for
    /// the unbounded top bracket.
    pub max_income: Option<Decimal>,
    /// The marginal rate applied above `min_income`, in [0, 1].
    pub tax_rate: Decimal,
    /// Cumulative tax payable from all lower brackets.
    pub fixed_amount: Decimal,
    /// Position of this bracket within the year, strictly increasing with
    /// income.
    pub bracket_order: u32,
    /// Whether this bracket participates in resolution.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn middle_bracket() -> TaxBracket {
        TaxBracket {
            financial_year: "2024-25".to_string(),
            min_income: dec("18201"),
            max_income: Some(dec("45000")),
            tax_rate: dec("0.16"),
            fixed_amount: Decimal::ZERO,
            bracket_order: 2,
            is_active: true,
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let bracket = middle_bracket();
        let json = serde_json::to_string(&bracket).unwrap();
        let back: TaxBracket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bracket);
    }

    #[test]
    fn test_unbounded_max_serializes_as_null() {
        let mut bracket = middle_bracket();
        bracket.max_income = None;
        let json = serde_json::to_value(&bracket).unwrap();
        assert!(json["max_income"].is_null());
    }
}
