//! Offset and levy models.
//!
//! Offsets reduce base tax and levies add to it. Both are rule-based amounts
//! evaluated against taxable income alone, so rules within a year apply
//! independently of one another and of evaluation order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an offset's value is derived from taxable income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OffsetAmount {
    /// A fixed dollar amount.
    Fixed(Decimal),
    /// A rate applied to the whole taxable income.
    RateOfIncome(Decimal),
}

/// A rule-based reduction applied after gross tax, for one financial year.
///
/// An offset is eligible when taxable income falls inside its
/// `[min_income, max_income]` range (`max_income: None` means no upper
/// limit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxOffset {
    /// The financial year this offset belongs to.
    pub financial_year: String,
    /// A short identifier for the offset (e.g., "low_income_offset").
    pub name: String,
    /// The lowest eligible income (inclusive).
    pub min_income: Decimal,
    /// The highest eligible income (inclusive), or `None` for no upper limit.
    pub max_income: Option<Decimal>,
    /// How the offset value is computed.
    pub amount: OffsetAmount,
}

impl TaxOffset {
    /// Returns the offset value for `income`, or zero when ineligible.
    pub fn amount_for(&self, income: Decimal) -> Decimal {
        let eligible =
            income >= self.min_income && self.max_income.is_none_or(|max| income <= max);
        if !eligible {
            return Decimal::ZERO;
        }
        match self.amount {
            OffsetAmount::Fixed(amount) => amount,
            OffsetAmount::RateOfIncome(rate) => income * rate,
        }
    }
}

/// A rule-based addition applied after offsets, for one financial year.
///
/// A levy charges `rate` on the income in excess of `threshold`, optionally
/// capped at `cap`. Charging the excess rather than the whole income keeps
/// net liability continuous as income crosses the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevy {
    /// The financial year this levy belongs to.
    pub financial_year: String,
    /// A short identifier for the levy (e.g., "medicare_levy").
    pub name: String,
    /// The flat rate charged on income above the threshold.
    pub rate: Decimal,
    /// Income at or below this threshold attracts no levy.
    pub threshold: Decimal,
    /// Optional upper bound on the levy amount.
    pub cap: Option<Decimal>,
}

impl TaxLevy {
    /// Returns the levy payable for `income`.
    pub fn amount_for(&self, income: Decimal) -> Decimal {
        let excess = income - self.threshold;
        if excess <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let amount = excess * self.rate;
        match self.cap {
            Some(cap) if amount > cap => cap,
            _ => amount,
        }
    }
}
