//! Settings loader
//!
//! Loading pipeline:
//! 1. Read the whole file (handle released before parsing)
//! 2. Strip a UTF-8 byte-order mark
//! 3. JSON parsing
//! 4. Root must be an object

use crate::config::settings::{Settings, json_kind};
use crate::error::LoadError;

use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// UTF-8 encoding of U+FEFF.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Loads and parses the settings file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the path does not exist,
/// [`LoadError::Io`] for other read failures, [`LoadError::Parse`] if the
/// content is not valid UTF-8 JSON, and [`LoadError::Schema`] if the root
/// is not an object.
pub fn load(path: &Path) -> Result<Settings, LoadError> {
    tracing::debug!(path = %path.display(), "reading settings file");

    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: absolute(path),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(bytes = bytes.len(), "settings file read");

    parse(path, &bytes)
}

/// Parses settings from in-memory text, applying the same BOM and root
/// checks as [`load`].
///
/// # Errors
///
/// Returns [`LoadError::Parse`] or [`LoadError::Schema`].
pub fn load_from_str(path: &Path, text: &str) -> Result<Settings, LoadError> {
    parse(path, text.as_bytes())
}

fn parse(path: &Path, bytes: &[u8]) -> Result<Settings, LoadError> {
    let bytes = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => {
            tracing::trace!("stripped UTF-8 byte-order mark");
            rest
        }
        None => bytes,
    };

    let root: Value = serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    match root {
        Value::Object(map) => Ok(Settings::new(path, map)),
        other => Err(LoadError::Schema {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Best-effort absolute form of `path` for "not found" diagnostics.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_load_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "settings.json", br#"{"project": "etl", "instance": "dev"}"#);

        let settings = load(&path).unwrap();
        assert_eq!(settings.path(), path.as_path());
        assert_eq!(settings.get("project").unwrap(), "etl");
        assert_eq!(settings.get("instance").unwrap(), "dev");
    }

    #[test]
    fn test_load_with_bom_matches_without() {
        let dir = tempfile::tempdir().unwrap();
        let body = br#"{"project": "etl", "repos": [{"name": "a", "url": "u"}]}"#;
        let plain = write_temp(&dir, "plain.json", body);

        let mut with_bom = UTF8_BOM.to_vec();
        with_bom.extend_from_slice(body);
        let bom = write_temp(&dir, "bom.json", &with_bom);

        let a = load(&plain).unwrap();
        let b = load(&bom).unwrap();
        assert_eq!(a.as_map(), b.as_map());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load(&path).unwrap_err();
        match err {
            LoadError::NotFound { path: reported } => {
                assert!(reported.is_absolute());
                assert!(reported.ends_with("absent.json"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_relative_missing_path_is_made_absolute() {
        let err = load(Path::new("definitely/not/here/settings.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { ref path } if path.is_absolute()));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
        assert!(err.to_string().starts_with("Cannot read "));
    }

    #[test]
    fn test_trailing_comma_is_parse_error_with_location() {
        let text = "{\n  \"project\": \"etl\",\n}\n";
        let err = load_from_str(Path::new("settings.json"), text).unwrap_err();
        match &err {
            LoadError::Parse { line, column, .. } => {
                assert_eq!(*line, 3);
                assert!(*column > 0);
            }
            other => panic!("expected Parse, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid JSON in settings.json: "));
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "binary.json", b"{\"project\": \"\xff\xfe\"}");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let err = load_from_str(Path::new("settings.json"), "").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_non_object_root_is_schema_error() {
        for (text, kind) in [("[1, 2]", "array"), ("\"x\"", "string"), ("null", "null")] {
            let err = load_from_str(Path::new("settings.json"), text).unwrap_err();
            match err {
                LoadError::Schema { found, .. } => assert_eq!(found, kind),
                other => panic!("expected Schema for {text}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bom_only_stripped_once() {
        let text = "\u{feff}\u{feff}{}";
        let err = load_from_str(Path::new("settings.json"), text).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
