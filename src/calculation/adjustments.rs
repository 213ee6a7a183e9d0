//! Offset and levy application.
//!
//! Offsets reduce gross tax and levies add to it. Each rule is evaluated
//! against taxable income alone, so rules are order-independent and an empty
//! rule set is a valid state, not an error.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{TaxLevy, TaxOffset};

/// The outcome of applying offsets and levies to a gross tax amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentOutcome {
    /// Sum of all eligible offsets.
    pub total_offsets: Decimal,
    /// Sum of all applicable levies.
    pub total_levies: Decimal,
    /// `max(0, gross_tax - total_offsets + total_levies)`, rounded to
    /// 2 decimal places.
    pub net_tax_payable: Decimal,
}

/// Applies a year's offset and levy rules to a gross tax amount.
///
/// Offsets and levies are summed independently; each rule decides its own
/// eligibility from `income`. The net amount is floored at zero (offsets can
/// eliminate liability but never produce a refund) and rounded to 2 decimal
/// places here, at the final boundary.
///
/// # Arguments
///
/// * `gross_tax` - Progressive tax from brackets, unrounded
/// * `income` - The taxable income the rules are evaluated against
/// * `offsets` - The year's offset rules (may be empty)
/// * `levies` - The year's levy rules (may be empty)
pub fn apply_adjustments(
    gross_tax: Decimal,
    income: Decimal,
    offsets: &[TaxOffset],
    levies: &[TaxLevy],
) -> AdjustmentOutcome {
    let total_offsets: Decimal = offsets.iter().map(|o| o.amount_for(income)).sum();
    let total_levies: Decimal = levies.iter().map(|l| l.amount_for(income)).sum();

    let net = (gross_tax - total_offsets + total_levies)
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    AdjustmentOutcome {
        total_offsets,
        total_levies,
        net_tax_payable: net,
    }
}
