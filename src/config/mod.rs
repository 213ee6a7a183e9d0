//! Reference-data loading and management for the tax engine.
//!
//! This module provides functionality to load bracket, offset, and levy
//! tables from YAML files into the in-memory [`TaxTables`] dataset.
//!
//! # Example
//!
//! ```no_run
//! use tax_engine::config::ConfigLoader;
//!
//! let tables = ConfigLoader::load("./config/tax_tables").unwrap();
//! println!("Known years: {:?}", tables.known_years());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BracketRow, LevyRow, OffsetRow, TaxTables};
