//! HTTP API module for the tax engine.
//!
//! This module provides the REST API endpoints for calculating, comparing,
//! and projecting income tax liability.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompareParams, HistoryParams};
pub use response::{ApiError, HealthResponse};
pub use state::AppState;
