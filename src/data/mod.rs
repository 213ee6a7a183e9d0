//! Reference-data access for the tax engine.
//!
//! The engine reads brackets, offsets, and levies through the
//! [`TaxDataSource`] trait; [`TaxDataCache`] memoizes those lookups per
//! financial year, and [`StaticTaxData`] is the in-memory trait
//! implementation used both in production (over YAML-loaded tables) and in
//! tests.

mod cache;
mod memory;
mod repository;

pub use cache::{FETCH_TIMEOUT, RETRY_BACKOFF, TaxDataCache};
pub use memory::StaticTaxData;
pub use repository::TaxDataSource;
