//! Error types for `etl-smoke`
//!
//! Each stage of the pipeline has its own error enum. `SmokeError`
//! aggregates them and owns the mapping to process exit codes.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for the `etl-smoke` binary.
pub struct ExitCode;

impl ExitCode {
    /// Settings loaded, validated and summarized
    pub const SUCCESS: i32 = 0;

    /// Settings file missing, unreadable, malformed, or not a JSON object
    pub const LOAD_ERROR: i32 = 2;

    /// Missing required keys or a conventional field with the wrong shape
    pub const VALIDATION_ERROR: i32 = 3;

    /// Anything outside the taxonomy above (output failure, panic)
    pub const UNEXPECTED: i32 = 4;

    /// Usage error (invalid arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for a smoke run.
#[derive(Debug, Error)]
pub enum SmokeError {
    /// Settings file could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Settings loaded but failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing the summary failed
    #[error("Unexpected exception: failed writing summary: {0}")]
    Output(#[from] std::io::Error),

    /// Catch-all for failures with no dedicated category
    #[error("Unexpected exception: {0}")]
    Unexpected(String),
}

impl SmokeError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Load(_) => ExitCode::LOAD_ERROR,
            Self::Validation(_) => ExitCode::VALIDATION_ERROR,
            Self::Output(_) | Self::Unexpected(_) => ExitCode::UNEXPECTED,
        }
    }
}

// ============================================================================
// Load Errors
// ============================================================================

/// Failures while reading and parsing the settings file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The settings path does not exist
    #[error("Settings file not found: {}", path.display())]
    NotFound {
        /// Absolute form of the path that was looked up
        path: PathBuf,
    },

    /// The file content is not valid JSON
    #[error("Invalid JSON in {}: {message}", path.display())]
    Parse {
        /// Path to the settings file
        path: PathBuf,
        /// Line reported by the parser (1-based, 0 if unknown)
        line: usize,
        /// Column reported by the parser (1-based, 0 if unknown)
        column: usize,
        /// Parser message, including line and column
        message: String,
    },

    /// Any other read failure (permissions, is a directory, ...)
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The document parsed but its root is not an object
    #[error("Root of {} must be a JSON object, found {found}", path.display())]
    Schema {
        /// Path to the settings file
        path: PathBuf,
        /// JSON kind found at the root
        found: &'static str,
    },
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Failures found by the validator. The first failure stops validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more required keys are absent
    #[error("Missing required keys in {}: {}", path.display(), keys.join(", "))]
    MissingKeys {
        /// Path to the settings file
        path: PathBuf,
        /// Missing keys, in required-key order
        keys: Vec<String>,
    },

    /// A conventional field has the wrong shape
    #[error(transparent)]
    Shape(#[from] ShapeViolation),
}

/// Shape constraint violated by a conventional field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    /// `repos` is present but not a list
    #[error("'repos' must be a list.")]
    ReposNotList,

    /// An element of `repos` is not an object
    #[error("repos[{index}] must be an object.")]
    RepoNotObject {
        /// Position of the element in `repos`
        index: usize,
    },

    /// A repo entry field is missing, not a string, or blank
    #[error("repos[{index}].{field} must be a non-empty string.")]
    RepoField {
        /// Position of the element in `repos`
        index: usize,
        /// Offending field (`name` or `url`)
        field: &'static str,
    },

    /// `secrets` is present but not an object
    #[error("'secrets' must be an object.")]
    SecretsNotObject,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for smoke-run operations.
pub type Result<T> = std::result::Result<T, SmokeError>;

// ============================================================================
// Tests
// ============================================================================
