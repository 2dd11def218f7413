//! Doctor command implementation.

use anyhow::Result;
use issues_lib::model::{STATE_KEY, STATUS_KEY};
use issues_lib::{Issue, Status, file};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;

/// At most this many offending entries are listed per check.
const MAX_LISTED: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
struct DoctorReport {
    ok: bool,
    checks: Vec<CheckResult>,
}

fn push_check(
    checks: &mut Vec<CheckResult>,
    name: &str,
    status: CheckStatus,
    message: Option<String>,
    details: Option<serde_json::Value>,
) {
    checks.push(CheckResult {
        name: name.to_string(),
        status,
        message,
        details,
    });
}

fn has_error(checks: &[CheckResult]) -> bool {
    checks
        .iter()
        .any(|check| matches!(check.status, CheckStatus::Error))
}

fn print_report(report: &DoctorReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("gi doctor");
    for check in &report.checks {
        let label = match check.status {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Error => "ERROR",
        };
        if let Some(message) = &check.message {
            println!("{label} {}: {}", check.name, message);
        } else {
            println!("{label} {}", check.name);
        }
    }
    Ok(())
}

fn check_parse(path: &Path, checks: &mut Vec<CheckResult>) -> Option<Vec<Issue>> {
    match file::load(path) {
        Ok(issues) => {
            push_check(
                checks,
                "file.parse",
                CheckStatus::Ok,
                Some(format!("Parsed {} issues", issues.len())),
                Some(serde_json::json!({
                    "path": path.display().to_string(),
                    "issues": issues.len()
                })),
            );
            Some(issues)
        }
        Err(err) => {
            push_check(
                checks,
                "file.parse",
                CheckStatus::Error,
                Some(err.to_string()),
                Some(serde_json::json!({ "path": path.display().to_string() })),
            );
            None
        }
    }
}

fn check_required_fields(issues: &[Issue], checks: &mut Vec<CheckResult>) {
    let mut missing = Vec::new();
    let mut missing_count = 0usize;

    for (index, issue) in issues.iter().enumerate() {
        let mut fields = Vec::new();
        if issue.id().is_none_or(Value::is_null) {
            fields.push("id");
        }
        if issue.title().is_none_or(|title| title.trim().is_empty()) {
            fields.push("title");
        }
        if issue.status() == Status::Missing {
            fields.push("status");
        }
        if !fields.is_empty() {
            missing_count += 1;
            if missing.len() < MAX_LISTED {
                missing.push(serde_json::json!({ "index": index, "missing": fields }));
            }
        }
    }

    if missing.is_empty() {
        push_check(checks, "issues.required_fields", CheckStatus::Ok, None, None);
    } else {
        push_check(
            checks,
            "issues.required_fields",
            CheckStatus::Warn,
            Some(format!("{missing_count} issue(s) missing id, title or status")),
            Some(serde_json::json!({ "entries": missing, "count": missing_count })),
        );
    }
}

fn check_duplicate_ids(issues: &[Issue], checks: &mut Vec<CheckResult>) {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in issues.iter().filter_map(Issue::id).filter(|id| !id.is_null()) {
        let key = id.to_string();
        if !seen.insert(key) && duplicates.len() < MAX_LISTED && !duplicates.contains(id) {
            duplicates.push(id.clone());
        }
    }

    if duplicates.is_empty() {
        push_check(checks, "issues.duplicate_ids", CheckStatus::Ok, None, None);
    } else {
        push_check(
            checks,
            "issues.duplicate_ids",
            CheckStatus::Warn,
            Some("Duplicate issue ids".to_string()),
            Some(serde_json::json!({ "ids": duplicates })),
        );
    }
}

/// `status` and `state` both set but disagreeing; `status` wins on read.
fn check_status_sync(issues: &[Issue], checks: &mut Vec<CheckResult>) {
    let mut conflicts = Vec::new();
    for (index, issue) in issues.iter().enumerate() {
        let status = Status::parse(issue.raw_status(STATUS_KEY));
        let state = Status::parse(issue.raw_status(STATE_KEY));
        if status != Status::Missing && state != Status::Missing && status != state {
            conflicts.push(serde_json::json!({
                "index": index,
                "status": status.as_str(),
                "state": state.as_str(),
            }));
        }
    }

    if conflicts.is_empty() {
        push_check(checks, "issues.status_sync", CheckStatus::Ok, None, None);
    } else {
        let count = conflicts.len();
        conflicts.truncate(MAX_LISTED);
        push_check(
            checks,
            "issues.status_sync",
            CheckStatus::Warn,
            Some(format!("{count} issue(s) where status and state disagree")),
            Some(serde_json::json!({ "entries": conflicts, "count": count })),
        );
    }
}

fn check_unknown_statuses(issues: &[Issue], checks: &mut Vec<CheckResult>) {
    let mut unknown: Vec<String> = issues
        .iter()
        .filter_map(|issue| match issue.status() {
            Status::Custom(value) => Some(value),
            _ => None,
        })
        .collect();
    unknown.sort();
    unknown.dedup();

    if unknown.is_empty() {
        push_check(checks, "issues.statuses", CheckStatus::Ok, None, None);
    } else {
        push_check(
            checks,
            "issues.statuses",
            CheckStatus::Warn,
            Some(format!("Unrecognized statuses: {}", unknown.join(", "))),
            Some(serde_json::json!({ "statuses": unknown })),
        );
    }
}

fn run_checks(config: &Config) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let resolved = match config.locator().locate() {
        Ok(resolved) => resolved,
        Err(err) => {
            push_check(
                &mut checks,
                "file.locate",
                CheckStatus::Error,
                Some(err.to_string()),
                None,
            );
            return checks;
        }
    };
    push_check(
        &mut checks,
        "file.locate",
        CheckStatus::Ok,
        Some(format!(
            "{} ({})",
            resolved.path.display(),
            resolved.source.as_str()
        )),
        None,
    );

    if let Some(issues) = check_parse(&resolved.path, &mut checks) {
        check_required_fields(&issues, &mut checks);
        check_duplicate_ids(&issues, &mut checks);
        check_status_sync(&issues, &mut checks);
        check_unknown_statuses(&issues, &mut checks);
    }

    checks
}

/// Execute the doctor command.
///
/// Exits the process with status 1 when any check reports an error.
///
/// # Errors
///
/// Returns an error if report serialization fails.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let checks = run_checks(config);
    let report = DoctorReport {
        ok: !has_error(&checks),
        checks,
    };
    print_report(&report, json)?;

    if !report.ok {
        std::process::exit(1);
    }

    Ok(())
}
