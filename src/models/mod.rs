//! Core data models for the tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod bracket;
mod calculation_result;

pub use adjustment::{OffsetAmount, TaxLevy, TaxOffset};
pub use bracket::TaxBracket;
pub use calculation_result::{TaxCalculationRequest, TaxCalculationResult};
