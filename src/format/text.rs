//! Text formatting functions for `git_issues`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ✓ ?)
//! - Issue ids (numbers or strings)
//! - Issue line formatting

use issues_lib::{Issue, Status};
use serde_json::Value;

/// Status icon characters.
pub mod icons {
    /// Open-like status (open, opened, todo, backlog, in_progress).
    pub const OPEN: &str = "○";
    /// Implemented, closed or completed.
    pub const DONE: &str = "✓";
    /// Anything else, including a missing status.
    pub const UNKNOWN: &str = "?";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: &Status) -> &'static str {
    if status.is_open() {
        icons::OPEN
    } else if status.is_done() {
        icons::DONE
    } else {
        icons::UNKNOWN
    }
}

/// Status name, or `-` when missing.
#[must_use]
pub fn format_status(status: &Status) -> &str {
    match status {
        Status::Missing => "-",
        other => other.as_str(),
    }
}

/// Render an issue id: strings verbatim, other JSON values as JSON, `-` if absent.
#[must_use]
pub fn format_id(issue: &Issue) -> String {
    match issue.id() {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    }
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} [{status}] {title}`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    let status = issue.status();
    format!(
        "{} {} [{}] {}",
        format_status_icon(&status),
        format_id(issue),
        format_status(&status),
        issue.title().unwrap_or("(untitled)"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_test_issue(value: Value) -> Issue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(format_status_icon(&Status::Open), "○");
        assert_eq!(format_status_icon(&Status::Backlog), "○");
        assert_eq!(format_status_icon(&Status::InProgress), "○");
        assert_eq!(format_status_icon(&Status::Implemented), "✓");
        assert_eq!(format_status_icon(&Status::Closed), "✓");
        assert_eq!(format_status_icon(&Status::Completed), "✓");
        assert_eq!(format_status_icon(&Status::Missing), "?");
        assert_eq!(
            format_status_icon(&Status::Custom("wontfix".to_string())),
            "?"
        );
    }

    #[test]
    fn test_format_id() {
        assert_eq!(format_id(&make_test_issue(json!({"id": 12}))), "12");
        assert_eq!(format_id(&make_test_issue(json!({"id": "gh-7"}))), "gh-7");
        assert_eq!(format_id(&make_test_issue(json!({"id": null}))), "-");
        assert_eq!(format_id(&make_test_issue(json!({}))), "-");
    }

    #[test]
    fn test_format_issue_line_open() {
        let issue = make_test_issue(json!({"id": 1, "title": "Add health endpoint", "status": " Open"}));
        assert_eq!(format_issue_line(&issue), "○ 1 [open] Add health endpoint");
    }

    #[test]
    fn test_format_issue_line_uses_state() {
        let issue = make_test_issue(json!({"id": "x-1", "title": "Cache", "state": "closed"}));
        assert_eq!(format_issue_line(&issue), "✓ x-1 [closed] Cache");
    }

    #[test]
    fn test_format_issue_line_missing_fields() {
        let issue = make_test_issue(json!({}));
        assert_eq!(format_issue_line(&issue), "? - [-] (untitled)");
    }
}
