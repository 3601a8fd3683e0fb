//! Settings validation
//!
//! Validation runs in three steps and stops at the first failure:
//! 1. Resolve the effective required-key set
//! 2. Presence check for every required key
//! 3. Shape checks on `repos` and `secrets` when present

use crate::config::settings::{
    INSTANCE_KEY, PROJECT_KEY, REPOS_KEY, REQUIRED_KEYS_KEY, SECRETS_KEY, Settings,
};
use crate::error::{ShapeViolation, ValidationError};

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Required keys used when the document does not override them.
pub const DEFAULT_REQUIRED_KEYS: [&str; 4] = [PROJECT_KEY, INSTANCE_KEY, REPOS_KEY, SECRETS_KEY];

/// Repo entry fields that must be non-empty strings, in check order.
const REPO_REQUIRED_FIELDS: [&str; 2] = ["name", "url"];

/// Maximum edit distance for "did you mean" hints on missing keys.
const SUGGESTION_DISTANCE: usize = 2;

// ============================================================================
// Required Keys
// ============================================================================

/// Where the effective required-key set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The document's own `required_keys` list.
    Override,
    /// [`DEFAULT_REQUIRED_KEYS`].
    Default,
}

/// Ordered set of required top-level keys. Duplicates are collapsed,
/// keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredKeys {
    keys: Vec<String>,
    source: KeySource,
}

impl RequiredKeys {
    /// The built-in default set.
    #[must_use]
    pub fn defaults() -> Self {
        Self::collect(DEFAULT_REQUIRED_KEYS, KeySource::Default)
    }

    /// Builds an override set from `keys`, de-duplicated in order.
    pub fn from_override<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::collect(keys, KeySource::Override)
    }

    /// Resolves the required keys for `settings`.
    ///
    /// Uses `required_keys` when it is a list of strings; falls back to the
    /// defaults otherwise.
    #[must_use]
    pub fn resolve(settings: &Settings) -> Self {
        let Some(value) = settings.get(REQUIRED_KEYS_KEY) else {
            return Self::defaults();
        };

        match string_list(value) {
            Some(keys) => Self::from_override(keys),
            None => {
                tracing::warn!(
                    path = %settings.path().display(),
                    "'{REQUIRED_KEYS_KEY}' is not a list of strings, using default required keys"
                );
                Self::defaults()
            }
        }
    }

    fn collect<I, S>(keys: I, source: KeySource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| seen.insert(k.clone()))
            .collect();
        Self { keys, source }
    }

    /// Keys in required order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    /// Where the set came from.
    #[must_use]
    pub const fn source(&self) -> KeySource {
        self.source
    }

    /// Number of required keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if `key` is in the set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Required keys absent from `settings`, in required order.
    #[must_use]
    pub fn missing_from(&self, settings: &Settings) -> Vec<String> {
        self.keys
            .iter()
            .filter(|k| !settings.contains_key(k))
            .cloned()
            .collect()
    }
}

impl fmt::Display for RequiredKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keys.join(", "))
    }
}

/// Returns the elements of `value` if it is an array of strings only.
fn string_list(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}

// ============================================================================
// Validation
// ============================================================================

/// Validates `settings` and returns the effective required-key set.
///
/// # Errors
///
/// Returns [`ValidationError::MissingKeys`] if any required key is absent,
/// or [`ValidationError::Shape`] for the first shape violation found.
pub fn validate(settings: &Settings) -> Result<RequiredKeys, ValidationError> {
    let required = RequiredKeys::resolve(settings);
    tracing::debug!(
        source = ?required.source(),
        keys = %required,
        "resolved required keys"
    );

    let missing = required.missing_from(settings);
    if !missing.is_empty() {
        for key in &missing {
            if let Some(candidate) = suggest_key(settings, &required, key) {
                tracing::warn!("missing key '{key}': did you mean '{candidate}'?");
            }
        }
        return Err(ValidationError::MissingKeys {
            path: settings.path().to_path_buf(),
            keys: missing,
        });
    }

    if let Some(repos) = settings.get(REPOS_KEY) {
        check_repos(repos)?;
    }

    if settings.get(SECRETS_KEY).is_some_and(|s| !s.is_object()) {
        return Err(ShapeViolation::SecretsNotObject.into());
    }

    Ok(required)
}

/// Checks `repos` is a list of objects with non-blank `name` and `url`.
///
/// # Errors
///
/// Returns the first violation by element index, then field order.
pub fn check_repos(repos: &Value) -> Result<(), ShapeViolation> {
    let entries = repos.as_array().ok_or(ShapeViolation::ReposNotList)?;

    for (index, entry) in entries.iter().enumerate() {
        let fields = entry
            .as_object()
            .ok_or(ShapeViolation::RepoNotObject { index })?;

        for field in REPO_REQUIRED_FIELDS {
            let valid = fields
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !is_blank(s));
            if !valid {
                return Err(ShapeViolation::RepoField { index, field });
            }
        }
    }

    Ok(())
}

/// Returns `true` for empty strings and strings of separators only.
///
/// Besides Unicode white space, the ASCII information separators
/// U+001C..=U+001F count as blank.
fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Suggests a present top-level key that looks like a typo of `missing`.
///
/// Keys that are themselves required are never suggested, and the edit
/// distance must stay below the length of both keys.
#[must_use]
pub fn suggest_key(
    settings: &Settings,
    required: &RequiredKeys,
    missing: &str,
) -> Option<String> {
    settings
        .keys()
        .filter(|k| !required.contains(k))
        .map(|k| (k, strsim::damerau_levenshtein(missing, k)))
        .filter(|(k, dist)| *dist <= SUGGESTION_DISTANCE && *dist < missing.len().min(k.len()))
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Tests
// ============================================================================
