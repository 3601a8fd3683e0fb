//! Redacted settings summary
//!
//! [`Summary`] is built from a [`Settings`] document and carries only what
//! may be printed: names, counts, repo coordinates and secret key names.
//! Secret values never enter the model, so neither renderer can leak them.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::config::settings::{
    DEFAULT_BRANCH, INSTANCE_KEY, PROJECT_KEY, REPOS_KEY, SECRETS_KEY, Settings,
};

const BANNER: &str = "=== ETL Deploy :: Settings Summary ===";
const FOOTER: &str = "=== End Summary ===";
const UNKNOWN: &str = "<unknown>";
const INVALID_TYPE: &str = "<invalid type>";
const NO_NAME: &str = "<noname>";
const NO_URL: &str = "<nourl>";

/// One repository line of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoLine {
    /// Repository name, or `<noname>`.
    pub name: String,
    /// Repository URL, or `<nourl>`.
    pub url: String,
    /// Branch, or `main`.
    pub branch: String,
}

/// The `repos` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepoSection {
    /// `repos` is a list (or absent).
    Listed {
        /// Number of elements, including non-object ones.
        count: usize,
        /// One line per object element, in list order.
        entries: Vec<RepoLine>,
    },
    /// `repos` is present but not a list.
    InvalidType,
}

/// The `secrets` section. Only key names are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SecretSection {
    /// `secrets` is an object (or absent).
    Listed {
        /// Secret key names, sorted.
        keys: Vec<String>,
    },
    /// `secrets` is present but not an object.
    InvalidType,
}

/// Redacted, render-ready view of a settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// `project`, rendered as text.
    pub project: Option<String>,
    /// `instance`, rendered as text.
    pub instance: Option<String>,
    /// Repository listing.
    pub repos: RepoSection,
    /// Secret key names.
    pub secrets: SecretSection,
    /// Non-conventional top-level keys, sorted.
    pub other_keys: Vec<String>,
}

impl Summary {
    /// Builds the summary. Never fails: missing or mistyped fields fall
    /// back to placeholders.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            project: settings.get(PROJECT_KEY).map(display_value),
            instance: settings.get(INSTANCE_KEY).map(display_value),
            repos: repo_section(settings.get(REPOS_KEY)),
            secrets: secret_section(settings.get(SECRETS_KEY)),
            other_keys: settings.other_keys(),
        }
    }

    /// Writes the human-readable report.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_human<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{BANNER}")?;
        writeln!(out, "Project:  {}", self.project.as_deref().unwrap_or(UNKNOWN))?;
        writeln!(out, "Instance: {}", self.instance.as_deref().unwrap_or(UNKNOWN))?;

        match &self.repos {
            RepoSection::Listed { count, entries } => {
                writeln!(out, "Repos:    {count}")?;
                for repo in entries {
                    writeln!(out, "  - {} :: {} @ {}", repo.name, repo.url, repo.branch)?;
                }
            }
            RepoSection::InvalidType => writeln!(out, "Repos:    {INVALID_TYPE}")?,
        }

        match &self.secrets {
            SecretSection::Listed { keys } => {
                writeln!(out, "Secrets:  {} keys", keys.len())?;
                if !keys.is_empty() {
                    writeln!(out, "  keys: {}", keys.join(", "))?;
                }
            }
            SecretSection::InvalidType => writeln!(out, "Secrets:  {INVALID_TYPE}")?,
        }

        if !self.other_keys.is_empty() {
            writeln!(out, "Other keys: {}", self.other_keys.join(", "))?;
        }

        writeln!(out, "{FOOTER}")
    }

    /// Writes the summary as pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

fn repo_section(repos: Option<&Value>) -> RepoSection {
    let Some(repos) = repos else {
        return RepoSection::Listed {
            count: 0,
            entries: Vec::new(),
        };
    };
    let Some(items) = repos.as_array() else {
        return RepoSection::InvalidType;
    };

    let entries = items
        .iter()
        .filter_map(Value::as_object)
        .map(|repo| RepoLine {
            name: field_or(repo.get("name"), NO_NAME),
            url: field_or(repo.get("url"), NO_URL),
            branch: field_or(repo.get("branch"), DEFAULT_BRANCH),
        })
        .collect();

    RepoSection::Listed {
        count: items.len(),
        entries,
    }
}

fn secret_section(secrets: Option<&Value>) -> SecretSection {
    match secrets {
        None => SecretSection::Listed { keys: Vec::new() },
        Some(Value::Object(map)) => {
            let mut keys: Vec<String> = map.keys().cloned().collect();
            keys.sort();
            SecretSection::Listed { keys }
        }
        Some(_) => SecretSection::InvalidType,
    }
}

fn field_or(value: Option<&Value>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), display_value)
}

/// Strings print raw; everything else prints as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
