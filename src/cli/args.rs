//! CLI argument definitions
//!
//! Clap derive struct for `etl-smoke` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::settings::{DEFAULT_SETTINGS_FILE, SETTINGS_ENV_VAR};
use crate::observability::LogFormat;

/// Smoke check for ETL deploy settings files.
///
/// Loads the settings file, validates required keys and the shape of
/// `repos` and `secrets`, and prints a summary without secret values.
#[derive(Parser, Debug)]
#[command(name = "etl-smoke", author, version, about)]
pub struct Cli {
    /// Path to the JSON settings file.
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE, env = SETTINGS_ENV_VAR)]
    pub settings: PathBuf,

    /// Summary output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Log output format.
    #[arg(long, default_value = "human", env = "ETL_SMOKE_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output. Errors are still reported.
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", env = "ETL_SMOKE_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Summary output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report followed by an `[OK]` line.
    #[default]
    Human,
    /// Pretty-printed JSON document.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_settings_flag() {
        let cli = Cli::try_parse_from(["etl-smoke", "--settings", "conf/prod.json"]).unwrap();
        assert_eq!(cli.settings, PathBuf::from("conf/prod.json"));

        let cli = Cli::try_parse_from(["etl-smoke", "-s", "x.json"]).unwrap();
        assert_eq!(cli.settings, PathBuf::from("x.json"));
    }

    #[test]
    fn test_format_values() {
        let cli = Cli::try_parse_from(["etl-smoke", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);

        let result = Cli::try_parse_from(["etl-smoke", "--format", "yaml"]);
        assert!(result.is_err(), "Expected error for unknown format");
    }

    #[test]
    fn test_log_format_and_color() {
        let cli = Cli::try_parse_from([
            "etl-smoke",
            "--log-format",
            "json",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["etl-smoke", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["etl-smoke", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = Cli::try_parse_from(["etl-smoke", "--bogus"]);
        assert!(result.is_err());
    }
}
