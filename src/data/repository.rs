//! The data-collaborator seam.

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::models::{TaxBracket, TaxLevy, TaxOffset};

/// Abstract source of tax reference data.
///
/// The engine depends only on this trait; any concrete source (an in-memory
/// table, a relational store, a remote service) satisfies it. Fetches are
/// async and fallible: a backing-store failure surfaces as
/// `EngineError::DataUnavailable`, and the cache layer is responsible for
/// timeouts and retries.
///
/// Fetching an unknown year returns an empty sequence rather than an error;
/// the cache decides whether that is acceptable (offsets/levies) or not
/// (brackets).
#[async_trait]
pub trait TaxDataSource: Send + Sync {
    /// Fetches the bracket table for a financial year.
    async fn fetch_brackets(&self, year: &str) -> EngineResult<Vec<TaxBracket>>;

    /// Fetches the offset rules for a financial year.
    async fn fetch_offsets(&self, year: &str) -> EngineResult<Vec<TaxOffset>>;

    /// Fetches the levy rules for a financial year.
    async fn fetch_levies(&self, year: &str) -> EngineResult<Vec<TaxLevy>>;

    /// Enumerates the financial years with a bracket table, in
    /// chronological order.
    async fn fetch_known_years(&self) -> EngineResult<Vec<String>>;
}
