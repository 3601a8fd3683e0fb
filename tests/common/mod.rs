//! Shared integration-test harness for running the `etl-smoke` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use etl_smoke::config::SETTINGS_ENV_VAR;

/// Helpers for spawning `etl-smoke` and inspecting its output.
pub struct SmokeProcess;

impl SmokeProcess {
    /// Base command with a clean environment for settings resolution.
    #[must_use]
    pub fn command() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_etl-smoke"));
        cmd.env_remove(SETTINGS_ENV_VAR)
            .env_remove("ETL_SMOKE_LOG_LEVEL")
            .env_remove("ETL_SMOKE_LOG_FORMAT")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Runs the binary with `args` and waits for it to exit.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::command()
            .args(args)
            .output()
            .expect("failed to run etl-smoke")
    }

    /// Runs the binary against `settings` with extra `args`.
    #[allow(clippy::missing_panics_doc)]
    pub fn check(settings: &Path, args: &[&str]) -> Output {
        Self::command()
            .arg("--settings")
            .arg(settings)
            .args(args)
            .output()
            .expect("failed to run etl-smoke")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Writes `body` to `settings.json` in a fresh temp dir.
    #[allow(clippy::missing_panics_doc)]
    pub fn temp_settings(body: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, body).expect("failed to write settings");
        (dir, path)
    }
}

/// Lossy stdout of a finished process.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished process.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
