//! Reference-data table types.
//!
//! This module contains the strongly-typed row structures deserialized from
//! the YAML tax tables, and [`TaxTables`], the in-memory dataset they are
//! assembled into.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{OffsetAmount, TaxBracket, TaxLevy, TaxOffset};

fn default_true() -> bool {
    true
}

/// One bracket row as written in `brackets.yaml`.
///
/// The financial year is the map key in the file, so rows do not repeat it.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketRow {
    /// The lowest income taxed by this bracket (inclusive).
    pub min_income: Decimal,
    /// The highest income taxed by this bracket (inclusive), absent for the
    /// unbounded top bracket.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// The marginal rate applied above `min_income`.
    pub tax_rate: Decimal,
    /// Cumulative tax payable from all lower brackets.
    pub fixed_amount: Decimal,
    /// Position of this bracket within the year.
    pub bracket_order: u32,
    /// Whether this bracket participates in resolution.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One offset row as written in `offsets.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OffsetRow {
    /// A short identifier for the offset.
    pub name: String,
    /// The lowest eligible income (inclusive).
    pub min_income: Decimal,
    /// The highest eligible income (inclusive), absent for no upper limit.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// How the offset value is computed.
    pub amount: OffsetAmount,
}

/// One levy row as written in `levies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LevyRow {
    /// A short identifier for the levy.
    pub name: String,
    /// The flat rate charged on income above the threshold.
    pub rate: Decimal,
    /// Income at or below this threshold attracts no levy.
    pub threshold: Decimal,
    /// Optional upper bound on the levy amount.
    #[serde(default)]
    pub cap: Option<Decimal>,
}

/// Reference data for one financial year.
#[derive(Debug, Clone, Default)]
struct YearTable {
    brackets: Vec<TaxBracket>,
    offsets: Vec<TaxOffset>,
    levies: Vec<TaxLevy>,
}

/// The in-memory reference dataset: brackets, offsets, and levies keyed by
/// financial year.
///
/// A year is "known" when it has a bracket table; offsets and levies are
/// optional per year. Years iterate in ascending key order, which for
/// keys like "2024-25" is chronological.
///
/// # Example
///
/// ```
/// use tax_engine::config::TaxTables;
/// use tax_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let mut tables = TaxTables::new();
/// tables.insert_brackets(
///     "2024-25",
///     vec![TaxBracket {
///         financial_year: "2024-25".to_string(),
///         min_income: Decimal::ZERO,
///         max_income: None,
///         tax_rate: Decimal::ZERO,
///         fixed_amount: Decimal::ZERO,
///         bracket_order: 1,
///         is_active: true,
///     }],
/// );
/// assert_eq!(tables.known_years(), vec!["2024-25".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaxTables {
    years: BTreeMap<String, YearTable>,
}

impl TaxTables {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bracket table for a financial year.
    pub fn insert_brackets(&mut self, year: &str, brackets: Vec<TaxBracket>) {
        self.years.entry(year.to_string()).or_default().brackets = brackets;
    }

    /// Sets the offset rules for a financial year.
    pub fn insert_offsets(&mut self, year: &str, offsets: Vec<TaxOffset>) {
        self.years.entry(year.to_string()).or_default().offsets = offsets;
    }

    /// Sets the levy rules for a financial year.
    pub fn insert_levies(&mut self, year: &str, levies: Vec<TaxLevy>) {
        self.years.entry(year.to_string()).or_default().levies = levies;
    }

    /// Returns the bracket table for a year, empty when the year is unknown.
    pub fn brackets_for(&self, year: &str) -> &[TaxBracket] {
        self.years.get(year).map(|t| t.brackets.as_slice()).unwrap_or(&[])
    }

    /// Returns the offset rules for a year, empty when none are configured.
    pub fn offsets_for(&self, year: &str) -> &[TaxOffset] {
        self.years.get(year).map(|t| t.offsets.as_slice()).unwrap_or(&[])
    }

    /// Returns the levy rules for a year, empty when none are configured.
    pub fn levies_for(&self, year: &str) -> &[TaxLevy] {
        self.years.get(year).map(|t| t.levies.as_slice()).unwrap_or(&[])
    }

    /// Returns the years with a bracket table, in chronological order.
    pub fn known_years(&self) -> Vec<String> {
        self.years
            .iter()
            .filter(|(_, table)| !table.brackets.is_empty())
            .map(|(year, _)| year.clone())
            .collect()
    }
}

impl BracketRow {
    /// Converts this row into a [`TaxBracket`] for the given year.
    pub fn into_bracket(self, year: &str) -> TaxBracket {
        TaxBracket {
            financial_year: year.to_string(),
            min_income: self.min_income,
            max_income: self.max_income,
            tax_rate: self.tax_rate,
            fixed_amount: self.fixed_amount,
            bracket_order: self.bracket_order,
            is_active: self.is_active,
        }
    }
}

impl OffsetRow {
    /// Converts this row into a [`TaxOffset`] for the given year.
    pub fn into_offset(self, year: &str) -> TaxOffset {
        TaxOffset {
            financial_year: year.to_string(),
            name: self.name,
            min_income: self.min_income,
            max_income: self.max_income,
            amount: self.amount,
        }
    }
}

impl LevyRow {
    /// Converts this row into a [`TaxLevy`] for the given year.
    pub fn into_levy(self, year: &str) -> TaxLevy {
        TaxLevy {
            financial_year: year.to_string(),
            name: self.name,
            rate: self.rate,
            threshold: self.threshold,
            cap: self.cap,
        }
    }
}
