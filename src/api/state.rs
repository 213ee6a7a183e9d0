//! Application state for the tax engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::TaxEngine;

/// Shared application state.
///
/// Contains the tax engine (and through it the reference-data cache), shared
/// across all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<TaxEngine>,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: TaxEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the tax engine.
    pub fn engine(&self) -> &TaxEngine {
        &self.engine
    }
}
