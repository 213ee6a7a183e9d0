//! In-memory data source.

use async_trait::async_trait;

use crate::config::TaxTables;
use crate::error::EngineResult;
use crate::models::{TaxBracket, TaxLevy, TaxOffset};

use super::repository::TaxDataSource;

/// A [`TaxDataSource`] backed by an immutable in-memory [`TaxTables`]
/// dataset.
///
/// This is the source used in production (wrapping YAML-loaded tables) and
/// in tests (wrapping hand-built tables). Fetches never fail.
#[derive(Debug, Clone)]
pub struct StaticTaxData {
    tables: TaxTables,
}

impl StaticTaxData {
    /// Wraps a dataset as a data source.
    pub fn new(tables: TaxTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl TaxDataSource for StaticTaxData {
    async fn fetch_brackets(&self, year: &str) -> EngineResult<Vec<TaxBracket>> {
        Ok(self.tables.brackets_for(year).to_vec())
    }

    async fn fetch_offsets(&self, year: &str) -> EngineResult<Vec<TaxOffset>> {
        Ok(self.tables.offsets_for(year).to_vec())
    }

    async fn fetch_levies(&self, year: &str) -> EngineResult<Vec<TaxLevy>> {
        Ok(self.tables.levies_for(year).to_vec())
    }

    async fn fetch_known_years(&self) -> EngineResult<Vec<String>> {
        Ok(self.tables.known_years())
    }
}
