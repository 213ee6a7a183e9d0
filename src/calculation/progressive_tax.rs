//! Progressive base-tax computation.

use rust_decimal::Decimal;

use crate::models::TaxBracket;

/// Computes gross (base) tax for an income against its resolved bracket.
///
/// Formula: `fixed_amount + (income - min_income) * tax_rate`. The
/// `fixed_amount` carries the cumulative tax of all lower brackets, so only
/// the slice of income inside the resolved bracket is taxed at its marginal
/// rate.
///
/// All arithmetic stays in `Decimal` and the result is not rounded here;
/// rounding happens once, at the net-tax boundary, so it cannot compound
/// across offsets and levies.
///
/// # Example
///
/// ```
/// use tax_engine::calculation::compute_base_tax;
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
///
/// let gross = compute_base_tax(Decimal::from_str("50000").unwrap(), &bracket);
/// assert_eq!(gross, Decimal::from_str("5787.70").unwrap());
/// ```
pub fn compute_base_tax(income: Decimal, bracket: &TaxBracket) -> Decimal {
    bracket.fixed_amount + (income - bracket.min_income) * bracket.tax_rate
}
