//! `etl-smoke` - settings-file smoke check for ETL deployments
//!
//! Loads a JSON settings document, validates required keys and the shape of
//! the conventional fields, and renders a redacted summary.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod summary;
