//! The tax engine: orchestration of the per-year pipeline.
//!
//! [`TaxEngine`] runs the resolve → compute → adjust pipeline for single
//! calculations, multi-year comparisons, and historical series, with all
//! reference data supplied through the [`TaxDataCache`].

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::data::{TaxDataCache, TaxDataSource};
use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBracket, TaxCalculationRequest, TaxCalculationResult};

use super::adjustments::apply_adjustments;
use super::bracket_resolver::resolve_bracket;
use super::progressive_tax::compute_base_tax;

/// Upper bound on the span of a history request.
pub const MAX_HISTORY_YEARS: u32 = 20;

/// Computes tax liability against cached per-year reference data.
///
/// The engine is stateless apart from its cache and is safe to share across
/// concurrent requests: reference data is immutable once loaded, and the
/// pure computation path takes no locks.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tax_engine::calculation::TaxEngine;
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::data::StaticTaxData;
///
/// let tables = ConfigLoader::load("./config/tax_tables").unwrap();
/// let engine = TaxEngine::new(Arc::new(StaticTaxData::new(tables)));
/// ```
pub struct TaxEngine {
    cache: TaxDataCache,
}

impl TaxEngine {
    /// Creates an engine with an empty cache over the given data source.
    pub fn new(source: Arc<dyn TaxDataSource>) -> Self {
        Self {
            cache: TaxDataCache::new(source),
        }
    }

    /// Computes the tax liability for one income in one financial year.
    ///
    /// Rejects a negative `taxable_income` with a `Validation` error and an
    /// unknown `financial_year` with `YearNotFound`.
    pub async fn calculate(
        &self,
        request: &TaxCalculationRequest,
    ) -> EngineResult<TaxCalculationResult> {
        validate_income(request.taxable_income)?;
        self.liability_for_year(request.taxable_income, &request.financial_year)
            .await
    }

    /// Returns the bracket table for a financial year (a read-only
    /// projection of the reference data).
    pub async fn brackets_for(&self, year: &str) -> EngineResult<Vec<TaxBracket>> {
        Ok(self.cache.brackets_for(year).await?.as_ref().clone())
    }

    /// Computes liability for one income across the requested years.
    ///
    /// Results come back in request order, one per year. An unknown year
    /// fails the whole comparison with `YearNotFound` (no partial results),
    /// and an empty year list is rejected up front.
    pub async fn compare_across_years(
        &self,
        income: Decimal,
        years: &[String],
    ) -> EngineResult<Vec<TaxCalculationResult>> {
        validate_income(income)?;
        if years.is_empty() {
            return Err(EngineError::Validation {
                field: "years".to_string(),
                message: "at least one financial year is required".to_string(),
            });
        }

        let mut results = Vec::with_capacity(years.len());
        for year in years {
            results.push(self.liability_for_year(income, year).await?);
        }
        Ok(results)
    }

    /// Computes liability for one income over the `year_count` most recent
    /// known financial years, most recent first.
    ///
    /// `year_count` must be in `1..=MAX_HISTORY_YEARS`; that bound is
    /// checked before any data is fetched. When fewer years are known than
    /// requested the engine fails with `InsufficientData` rather than
    /// silently truncating.
    pub async fn history(
        &self,
        income: Decimal,
        year_count: u32,
    ) -> EngineResult<Vec<TaxCalculationResult>> {
        if year_count < 1 || year_count > MAX_HISTORY_YEARS {
            return Err(EngineError::Validation {
                field: "year_count".to_string(),
                message: format!("must be between 1 and {}", MAX_HISTORY_YEARS),
            });
        }
        validate_income(income)?;

        let known = self.cache.known_years().await?;
        if known.len() < year_count as usize {
            return Err(EngineError::InsufficientData {
                requested: year_count,
                available: known.len(),
            });
        }

        // Known years arrive in chronological order; the series is reported
        // most recent first.
        let window = known
            .iter()
            .rev()
            .take(year_count as usize)
            .cloned()
            .collect::<Vec<_>>();

        let mut results = Vec::with_capacity(window.len());
        for year in &window {
            results.push(self.liability_for_year(income, year).await?);
        }
        Ok(results)
    }

    /// Drops all cached reference data, forcing refetches on next access.
    pub async fn refresh(&self) {
        self.cache.refresh().await;
    }

    /// Runs the resolve → compute → adjust pipeline for one year.
    ///
    /// Income is assumed already validated by the public operations.
    async fn liability_for_year(
        &self,
        income: Decimal,
        year: &str,
    ) -> EngineResult<TaxCalculationResult> {
        let brackets = self.cache.brackets_for(year).await?;
        let bracket = resolve_bracket(income, &brackets)?;
        let gross_tax = compute_base_tax(income, bracket);

        let offsets = self.cache.offsets_for(year).await?;
        let levies = self.cache.levies_for(year).await?;
        let outcome = apply_adjustments(gross_tax, income, &offsets, &levies);

        let effective_rate = if income.is_zero() {
            Decimal::ZERO
        } else {
            (outcome.net_tax_payable / income)
                .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
        };

        debug!(
            year,
            income = %income,
            net = %outcome.net_tax_payable,
            "computed liability"
        );

        Ok(TaxCalculationResult {
            financial_year: year.to_string(),
            taxable_income: income,
            gross_tax,
            total_offsets: outcome.total_offsets,
            total_levies: outcome.total_levies,
            net_tax_payable: outcome.net_tax_payable,
            effective_rate,
        })
    }
}

fn validate_income(income: Decimal) -> EngineResult<()> {
    if income < Decimal::ZERO {
        return Err(EngineError::Validation {
            field: "taxable_income".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(())
}
