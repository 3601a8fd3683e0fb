//! Settings document model
//!
//! A loaded settings file is kept as the raw JSON object so that the
//! validator and summarizer can inspect fields whose shape is not yet known
//! to be valid.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Settings file used when neither `--settings` nor `ETL_SETTINGS` is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Environment variable that overrides the settings path.
pub const SETTINGS_ENV_VAR: &str = "ETL_SETTINGS";

/// Top-level key holding the project name.
pub const PROJECT_KEY: &str = "project";

/// Top-level key holding the instance name.
pub const INSTANCE_KEY: &str = "instance";

/// Top-level key holding the list of repository entries.
pub const REPOS_KEY: &str = "repos";

/// Top-level key holding the secrets mapping.
pub const SECRETS_KEY: &str = "secrets";

/// Top-level key that overrides the required-key set.
pub const REQUIRED_KEYS_KEY: &str = "required_keys";

/// Keys the summarizer reports in their own sections.
pub const CONVENTIONAL_KEYS: [&str; 5] = [
    PROJECT_KEY,
    INSTANCE_KEY,
    REPOS_KEY,
    SECRETS_KEY,
    REQUIRED_KEYS_KEY,
];

/// Branch assumed for a repo entry without `branch`.
pub const DEFAULT_BRANCH: &str = "main";

/// A loaded settings document: the root JSON object and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Settings {
    /// Wraps an already-parsed root object.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, root: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    /// Path the document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value of a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Returns `true` if the top-level key is present (even if `null`).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Iterates over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Top-level keys outside [`CONVENTIONAL_KEYS`], sorted.
    #[must_use]
    pub fn other_keys(&self) -> Vec<String> {
        let mut extra: Vec<String> = self
            .keys()
            .filter(|k| !CONVENTIONAL_KEYS.contains(k))
            .map(str::to_owned)
            .collect();
        extra.sort();
        extra
    }

    /// The root object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }
}

/// Name of the JSON kind of `value`, for diagnostics.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
