//! Calculation logic for the tax engine.
//!
//! This module contains the pure computation functions (bracket resolution,
//! progressive base-tax accumulation, and offset/levy application) and the
//! [`TaxEngine`] that orchestrates them per financial year for single
//! calculations, comparisons, and historical series.

mod adjustments;
mod bracket_resolver;
mod engine;
mod progressive_tax;

pub use adjustments::{AdjustmentOutcome, apply_adjustments};
pub use bracket_resolver::{resolve_bracket, validate_bracket_table};
pub use engine::{MAX_HISTORY_YEARS, TaxEngine};
pub use progressive_tax::compute_base_tax;
