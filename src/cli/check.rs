//! Smoke-check pipeline
//!
//! Load → validate → summarize. Each stage returns a `Result`; the first
//! error short-circuits back to `main`, which maps it to an exit code.

use std::io::Write;

use crate::cli::args::{Cli, OutputFormat};
use crate::config::{load, validate};
use crate::error::SmokeError;
use crate::summary::Summary;

/// Final stdout line of a successful human-format run.
pub const OK_LINE: &str = "[OK] Smoke run completed successfully.";

/// Runs the smoke check described by `cli`, writing the summary to `out`.
///
/// # Errors
///
/// Returns [`SmokeError::Load`] or [`SmokeError::Validation`] for settings
/// problems, and [`SmokeError::Output`] if writing to `out` fails.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), SmokeError> {
    tracing::info!(settings = %cli.settings.display(), "loading settings");
    let settings = load(&cli.settings)?;

    let required = validate(&settings)?;
    tracing::info!(
        required = required.len(),
        source = ?required.source(),
        "settings validated"
    );

    let summary = Summary::from_settings(&settings);
    match cli.format {
        OutputFormat::Human => {
            summary.write_human(out)?;
            writeln!(out, "{OK_LINE}")?;
        }
        OutputFormat::Json => summary.write_json(out)?,
    }
    out.flush()?;

    tracing::debug!("smoke run complete");
    Ok(())
}
