//! JSON file I/O for git issues.
//!
//! The file is a single JSON array of objects. Saves are canonical: two-space
//! indentation, keys sorted at every level, UTF-8 kept as-is, trailing newline.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{IssuesError, Result};
use crate::model::Issue;

/// Load issues from a JSON file.
///
/// # Errors
///
/// Returns `FileNotFound` if the file is missing, `Json` if it is not valid
/// JSON, or `Format` if it is not a list of objects.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IssuesError::FileNotFound(path.to_path_buf())
        } else {
            IssuesError::Io(e)
        }
    })?;

    let issues = parse(path, &content)?;
    debug!(path = %path.display(), count = issues.len(), "Loaded issues");
    Ok(issues)
}

/// Parse file content; `path` is only used for error messages.
///
/// # Errors
///
/// Returns `Json` for invalid JSON and `Format` for the wrong shape.
pub fn parse(path: &Path, content: &str) -> Result<Vec<Issue>> {
    let value: Value = serde_json::from_str(content).map_err(|source| IssuesError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(IssuesError::format(
                path,
                format!("expected a JSON list, found {}", kind(&other)),
            ));
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(Issue::new(fields)),
            other => Err(IssuesError::format(
                path,
                format!("entry {index} is not a JSON object (found {})", kind(&other)),
            )),
        })
        .collect()
}

/// Save issues to a JSON file with atomic write.
///
/// A symlinked path is written through to its target, and an existing
/// file keeps its permissions.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save(path: &Path, issues: &[Issue]) -> Result<()> {
    let content = to_canonical_string(issues).map_err(|source| IssuesError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let target = match dunce::canonicalize(path) {
        Ok(target) => target,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e.into()),
    };

    let tmp_path = tmp_path(&target);
    fs::write(&tmp_path, content)?;
    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(&tmp_path, metadata.permissions())?;
    }
    fs::rename(&tmp_path, &target)?;

    debug!(path = %path.display(), count = issues.len(), "Saved issues");
    Ok(())
}

/// The exact bytes `save` writes.
///
/// # Errors
///
/// Returns a serialization error (not expected for values loaded from JSON).
pub fn to_canonical_string(issues: &[Issue]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(&SortedIssues(issues))?;
    out.push('\n');
    Ok(out)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

// Key order must not depend on whether serde_json's `preserve_order` feature
// is enabled somewhere in the dependency graph.

struct SortedIssues<'a>(&'a [Issue]);

impl Serialize for SortedIssues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|issue| SortedMap(issue.fields())))
    }
}

struct SortedMap<'a>(&'a Map<String, Value>);

impl Serialize for SortedMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, SortedValue<'_>> = self
            .0
            .iter()
            .map(|(key, value)| (key.as_str(), SortedValue(value)))
            .collect();
        serializer.collect_map(sorted)
    }
}

struct SortedValue<'a>(&'a Value);

impl Serialize for SortedValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(SortedValue)),
            Value::Object(fields) => SortedMap(fields).serialize(serializer),
            scalar => scalar.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("git_issues.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_list_of_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"[{"id": 1, "title": "First", "status": "open"}, {"id": 2, "title": "Second"}]"#,
        );

        let issues = load(&path).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].title(), Some("First"));
        assert_eq!(issues[1].id(), Some(&json!(2)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Path::new("/nonexistent/git_issues.json"));
        assert!(matches!(result, Err(IssuesError::FileNotFound(_))));
    }

    #[test]
    fn test_load_rejects_top_level_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), r#"{"issues": []}"#);

        let err = load(&path).unwrap_err();
        match err {
            IssuesError::Format { reason, .. } => assert!(reason.contains("an object")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_non_object_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), r#"[{"id": 1}, "two", {"id": 3}]"#);

        let err = load(&path).unwrap_err();
        match err {
            IssuesError::Format { reason, .. } => {
                assert!(reason.starts_with("entry 1 is not a JSON object"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[{\"id\": 1,}");

        assert!(matches!(load(&path), Err(IssuesError::Json { .. })));
    }

    #[test]
    fn test_load_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[]");

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_is_sorted_and_newline_terminated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[]");
        let issues = parse(
            &path,
            r#"[{"title": "Café", "status": "open", "id": 1, "meta": {"z": 1, "a": [{"y": 0, "b": 0}]}}]"#,
        )
        .unwrap();

        save(&path, &issues).unwrap();
        let written = fs::read_to_string(&path).unwrap();

        let expected = r#"[
  {
    "id": 1,
    "meta": {
      "a": [
        {
          "b": 0,
          "y": 0
        }
      ],
      "z": 1
    },
    "status": "open",
    "title": "Café"
  }
]
"#;
        assert_eq!(written, expected);
        assert!(!dir.path().join("git_issues.json.tmp").exists());
    }

    #[test]
    fn test_save_empty_list() {
        assert_eq!(to_canonical_string(&[]).unwrap(), "[]\n");
    }

    #[test]
    fn test_roundtrip_preserves_fields_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"[
                {"id": 3, "title": "C", "state": "closed", "labels": ["x"], "weight": 1.5},
                {"id": 1, "title": "A", "status": "open", "assignee": null},
                {"id": "gh-2", "title": "B", "status": "implemented", "nested": {"k": true}}
            ]"#,
        );

        let first = load(&path).unwrap();
        save(&path, &first).unwrap();
        let bytes_once = fs::read_to_string(&path).unwrap();

        let second = load(&path).unwrap();
        assert_eq!(first, second);
        let ids: Vec<_> = second.iter().map(|i| i.id().cloned()).collect();
        assert_eq!(ids, vec![Some(json!(3)), Some(json!(1)), Some(json!("gh-2"))]);

        save(&path, &second).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), bytes_once);
    }

    #[test]
    fn test_roundtrip_keeps_large_integers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"[{"id": 123456789012345678901234567890, "title": "Big", "status": "open"}]"#,
        );

        let issues = load(&path).unwrap();
        save(&path, &issues).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""id": 123456789012345678901234567890,"#), "{written}");
        assert!(!written.contains("e+"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_writes_through_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.json");
        fs::write(&real, r#"[{"id": 1, "status": "implemented"}]"#).unwrap();
        let link = dir.path().join("git_issues.json");
        symlink(&real, &link).unwrap();

        let mut issues = load(&link).unwrap();
        crate::query::close_implemented(&mut issues, chrono::Utc::now());
        save(&link, &issues).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let saved = load(&real).unwrap();
        assert_eq!(saved[0].get("status"), Some(&json!("closed")));
        assert!(!dir.path().join("real.json.tmp").exists());
        assert!(!dir.path().join("git_issues.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), r#"[{"id": 1, "status": "open"}]"#);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        let issues = load(&path).unwrap();
        save(&path, &issues).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
