//! Command-line interface
//!
//! Argument parsing and the smoke-check pipeline it drives.

pub mod args;
pub mod check;
