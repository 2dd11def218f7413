//! Output formatting for `git_issues`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! With `--json`, stdout carries only JSON; diagnostics go to stderr.

mod output;
mod text;

pub use output::{LocateOutput, TransitionOutput, VersionOutput};
pub use text::{format_id, format_issue_line, format_status, format_status_icon};
