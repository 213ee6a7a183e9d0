//! Reference-data loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tax tables
//! from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BracketRow, LevyRow, OffsetRow, TaxTables};

/// Loads the tax reference tables from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// config/tax_tables/
/// ├── brackets.yaml   # per-year bracket tables (required)
/// ├── offsets.yaml    # per-year offset rules (optional)
/// └── levies.yaml     # per-year levy rules (optional)
/// ```
///
/// Each file is a map from financial-year key to a list of rows. Monetary
/// values are quoted strings so they deserialize into `Decimal` without a
/// float round-trip. A missing `offsets.yaml` or `levies.yaml` means no
/// rules are configured, which is a valid state.
///
/// # Example
///
/// ```no_run
/// use tax_engine::config::ConfigLoader;
///
/// let tables = ConfigLoader::load("./config/tax_tables").unwrap();
/// println!("Known years: {:?}", tables.known_years());
/// ```
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads tax tables from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the tax-tables directory (e.g., "./config/tax_tables")
    ///
    /// # Returns
    ///
    /// Returns the assembled [`TaxTables`] on success, or an error if
    /// `brackets.yaml` is missing or any present file contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<TaxTables> {
        let path = path.as_ref();
        let mut tables = TaxTables::new();

        let brackets_path = path.join("brackets.yaml");
        let brackets = Self::load_yaml::<BTreeMap<String, Vec<BracketRow>>>(&brackets_path)?;
        for (year, rows) in brackets {
            let brackets = rows.into_iter().map(|r| r.into_bracket(&year)).collect();
            tables.insert_brackets(&year, brackets);
        }

        let offsets_path = path.join("offsets.yaml");
        if offsets_path.exists() {
            let offsets = Self::load_yaml::<BTreeMap<String, Vec<OffsetRow>>>(&offsets_path)?;
            for (year, rows) in offsets {
                let offsets = rows.into_iter().map(|r| r.into_offset(&year)).collect();
                tables.insert_offsets(&year, offsets);
            }
        }

        let levies_path = path.join("levies.yaml");
        if levies_path.exists() {
            let levies = Self::load_yaml::<BTreeMap<String, Vec<LevyRow>>>(&levies_path)?;
            for (year, rows) in levies {
                let levies = rows.into_iter().map(|r| r.into_levy(&year)).collect();
                tables.insert_levies(&year, levies);
            }
        }

        Ok(tables)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }
}
