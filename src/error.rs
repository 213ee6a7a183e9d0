//! Error types for the tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during tax calculation.

use thiserror::Error;

/// The main error type for the tax engine.
///
/// All operations in the engine return this error type. Each variant carries
/// the offending value so the transport layer can map it to a user-facing
/// status without inspecting engine internals.
///
/// # Example
///
/// ```
/// use tax_engine::error::EngineError;
///
/// let error = EngineError::YearNotFound {
///     year: "1999-00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Financial year not found: 1999-00");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller input was malformed or out of range (negative income, year
    /// count outside bounds). Never retried.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The input field that failed validation.
        field: String,
        /// A description of why the value was rejected.
        message: String,
    },

    /// The requested financial year has no bracket table.
    #[error("Financial year not found: {year}")]
    YearNotFound {
        /// The financial year key that was not found.
        year: String,
    },

    /// The bracket table for a year is malformed (gaps, overlaps, or a
    /// missing unbounded top bracket). Indicates corrupt reference data,
    /// not a user error.
    #[error("Malformed bracket table for {year}: {message}")]
    Configuration {
        /// The financial year whose table is malformed.
        year: String,
        /// A description of the structural problem.
        message: String,
    },

    /// The backing data source could not be reached.
    #[error("Tax reference data unavailable: {message}")]
    DataUnavailable {
        /// A description of the fetch failure.
        message: String,
    },

    /// A history request spans more years than are known.
    #[error("Insufficient tax history: requested {requested} years, only {available} known")]
    InsufficientData {
        /// The number of years requested.
        requested: u32,
        /// The number of years actually known.
        available: usize,
    },

    /// A reference-data file was not found at the specified path.
    #[error("Tax table file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A reference-data file could not be parsed.
    #[error("Failed to parse tax table file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
