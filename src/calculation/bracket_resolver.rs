//! Bracket resolution.
//!
//! This module finds the single bracket applicable to an income and validates
//! the structural invariants of a year's bracket table.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxBracket;

/// Finds the active bracket applicable to `income`.
///
/// Inactive brackets are ignored and the active set is considered in
/// `bracket_order`. A bracket's effective range runs from its own
/// `min_income` up to (but excluding) the next bracket's `min_income`, so a
/// fractional income between two published integer boundaries (e.g.
/// 18200.50 in a table whose bottom bracket ends at 18200 and whose next
/// starts at 18201) belongs to the lower bracket.
///
/// # Arguments
///
/// * `income` - The taxable income to resolve
/// * `brackets` - The bracket table for one financial year
///
/// # Returns
///
/// Returns the applicable bracket, or a `Configuration` error when no
/// active bracket starts at or below the income. For a table that passes
/// [`validate_bracket_table`] that cannot happen for non-negative incomes;
/// it indicates malformed reference data rather than a user error.
pub fn resolve_bracket(income: Decimal, brackets: &[TaxBracket]) -> EngineResult<&TaxBracket> {
    let mut active: Vec<&TaxBracket> = brackets.iter().filter(|b| b.is_active).collect();
    active.sort_by_key(|b| b.bracket_order);

    match active.iter().rposition(|b| b.min_income <= income) {
        Some(position) => Ok(active[position]),
        None => {
            let year = brackets
                .first()
                .map(|b| b.financial_year.clone())
                .unwrap_or_default();
            Err(EngineError::Configuration {
                year,
                message: format!("no bracket covers income {}", income),
            })
        }
    }
}

/// Validates the structural invariants of one year's active bracket set.
///
/// Checked invariants, over active brackets ordered by `bracket_order`:
///
/// - the set is non-empty and the bottom bracket starts at zero income with
///   `fixed_amount` zero
/// - ranges are contiguous: each bracket starts where the previous one ended
/// - exactly one bracket is unbounded, and it is the last
///
/// The cache runs this once when a year's table is first loaded, so corrupt
/// reference data is rejected before any computation uses it.
pub fn validate_bracket_table(year: &str, brackets: &[TaxBracket]) -> EngineResult<()> {
    let mut active: Vec<&TaxBracket> = brackets.iter().filter(|b| b.is_active).collect();
    active.sort_by_key(|b| b.bracket_order);

    let configuration = |message: String| EngineError::Configuration {
        year: year.to_string(),
        message,
    };

    let first = active
        .first()
        .ok_or_else(|| configuration("no active brackets".to_string()))?;

    if first.min_income != Decimal::ZERO {
        return Err(configuration(format!(
            "bottom bracket starts at {} instead of 0",
            first.min_income
        )));
    }
    if first.fixed_amount != Decimal::ZERO {
        return Err(configuration(format!(
            "bottom bracket has fixed amount {} instead of 0",
            first.fixed_amount
        )));
    }

    for pair in active.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        match lower.max_income {
            Some(max) => {
                let expected = max + Decimal::ONE;
                if upper.min_income != expected {
                    return Err(configuration(format!(
                        "bracket {} ends at {} but bracket {} starts at {}",
                        lower.bracket_order, max, upper.bracket_order, upper.min_income
                    )));
                }
            }
            None => {
                return Err(configuration(format!(
                    "unbounded bracket {} is not the top bracket",
                    lower.bracket_order
                )));
            }
        }
    }

    let last = active.last().unwrap_or(first);
    if last.max_income.is_some() {
        return Err(configuration("no unbounded top bracket".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(order: u32, min: &str, max: Option<&str>, rate: &str, fixed: &str) -> TaxBracket {
        TaxBracket {
            financial_year: "2024-25".to_string(),
            min_income: dec(min),
            max_income: max.map(dec),
            tax_rate: dec(rate),
            fixed_amount: dec(fixed),
            bracket_order: order,
            is_active: true,
        }
    }

    fn table_2024_25() -> Vec<TaxBracket> {
        vec![
            bracket(1, "0", Some("18200"), "0", "0"),
            bracket(2, "18201", Some("45000"), "0.16", "0"),
            bracket(3, "45001", Some("135000"), "0.30", "4288"),
            bracket(4, "135001", Some("190000"), "0.37", "31288"),
            bracket(5, "190001", None, "0.45", "51638"),
        ]
    }

    #[test]
    fn test_resolves_middle_bracket() {
        let brackets = table_2024_25();
        let resolved = resolve_bracket(dec("50000"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 3);
    }

    #[test]
    fn test_zero_income_resolves_to_bottom_bracket() {
        let brackets = table_2024_25();
        let resolved = resolve_bracket(Decimal::ZERO, &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 1);
    }

    #[test]
    fn test_boundary_income_belongs_to_lower_bracket() {
        let brackets = table_2024_25();
        let resolved = resolve_bracket(dec("45000"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 2);
        let resolved = resolve_bracket(dec("45001"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 3);
    }

    #[test]
    fn test_fractional_income_between_boundaries_resolves_to_lower_bracket() {
        let brackets = table_2024_25();
        let resolved = resolve_bracket(dec("18200.50"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 1);
        let resolved = resolve_bracket(dec("45000.25"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 2);
        let resolved = resolve_bracket(dec("190000.99"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 4);
    }

    #[test]
    fn test_large_income_resolves_to_unbounded_top_bracket() {
        let brackets = table_2024_25();
        let resolved = resolve_bracket(dec("2500000"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 5);
    }

    #[test]
    fn test_inactive_brackets_are_skipped() {
        let mut brackets = table_2024_25();
        brackets[2].is_active = false;

        // With bracket 3 inactive its range falls through to bracket 2.
        let resolved = resolve_bracket(dec("50000"), &brackets).unwrap();
        assert_eq!(resolved.bracket_order, 2);
    }

    #[test]
    fn test_income_below_bottom_bracket_is_configuration_error() {
        let brackets = vec![
            bracket(1, "18201", Some("45000"), "0.16", "0"),
            bracket(2, "45001", None, "0.30", "4288"),
        ];

        let result = resolve_bracket(dec("10000"), &brackets);
        match result.unwrap_err() {
            EngineError::Configuration { message, .. } => {
                assert!(message.contains("no bracket covers"));
            }
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_table() {
        assert!(validate_bracket_table("2024-25", &table_2024_25()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let result = validate_bracket_table("2024-25", &[]);
        match result.unwrap_err() {
            EngineError::Configuration { message, .. } => {
                assert_eq!(message, "no active brackets");
            }
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_gap() {
        let brackets = vec![
            bracket(1, "0", Some("18200"), "0", "0"),
            bracket(2, "18300", None, "0.16", "0"),
        ];
        assert!(validate_bracket_table("2024-25", &brackets).is_err());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let brackets = vec![
            bracket(1, "0", Some("20000"), "0", "0"),
            bracket(2, "18201", None, "0.16", "0"),
        ];
        assert!(validate_bracket_table("2024-25", &brackets).is_err());
    }

    #[test]
    fn test_validate_rejects_bounded_top_bracket() {
        let brackets = vec![
            bracket(1, "0", Some("18200"), "0", "0"),
            bracket(2, "18201", Some("45000"), "0.16", "0"),
        ];
        let result = validate_bracket_table("2024-25", &brackets);
        match result.unwrap_err() {
            EngineError::Configuration { message, .. } => {
                assert_eq!(message, "no unbounded top bracket");
            }
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_nonzero_bottom_fixed_amount() {
        let brackets = vec![
            bracket(1, "0", Some("18200"), "0", "100"),
            bracket(2, "18201", None, "0.16", "0"),
        ];
        assert!(validate_bracket_table("2024-25", &brackets).is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_bracket_below_top() {
        let brackets = vec![
            bracket(1, "0", None, "0", "0"),
            bracket(2, "18201", Some("45000"), "0.16", "0"),
        ];
        assert!(validate_bracket_table("2024-25", &brackets).is_err());
    }
}
