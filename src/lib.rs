//! Progressive Income Tax Engine for Australian Financial Years
//!
//! This crate computes personal income tax liability under Australia's
//! progressive marginal-rate schedules, compares liability for a fixed income
//! across financial years, and produces historical liability series.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
