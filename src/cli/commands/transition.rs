//! Close and complete command implementations.

use anyhow::{Context, Result};
use chrono::Utc;
use issues_lib::IssueStore;
use issues_lib::query::{self, Transition};
use serde_json::Value;
use tracing::info;

use crate::cli::TransitionArgs;
use crate::config::Config;
use crate::format::{TransitionOutput, format_issue_line};

/// Execute the close command: implemented -> closed.
///
/// # Errors
///
/// Returns an error if the issues file cannot be loaded or saved.
pub fn close(config: &Config, args: &TransitionArgs, json: bool) -> Result<()> {
    execute(config, query::CLOSE_IMPLEMENTED, args, json, ["Closed", "Would close"])
}

/// Execute the complete command: open / opened -> completed.
///
/// # Errors
///
/// Returns an error if the issues file cannot be loaded or saved.
pub fn complete(config: &Config, args: &TransitionArgs, json: bool) -> Result<()> {
    execute(config, query::COMPLETE_OPEN, args, json, ["Completed", "Would complete"])
}

/// `verbs` is `[applied, dry_run]`, used in the text summary line.
fn execute(
    config: &Config,
    transition: Transition,
    args: &TransitionArgs,
    json: bool,
    verbs: [&str; 2],
) -> Result<()> {
    let mut store = IssueStore::discover(&config.locator())?;
    let path = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let affected: Vec<usize> = store
        .issues()
        .iter()
        .enumerate()
        .filter(|(_, issue)| transition.applies_to(issue))
        .map(|(index, _)| index)
        .collect();

    let changed = store.apply(transition, Utc::now());

    if !args.dry_run {
        store
            .save()
            .with_context(|| format!("Failed to save issues to {path}"))?;
        info!(path = %path, changed, "Saved issues");
    }

    let touched: Vec<_> = affected.iter().map(|&index| &store.issues()[index]).collect();

    if json {
        let output = TransitionOutput {
            path,
            transition: transition.name,
            changed,
            changed_ids: touched
                .iter()
                .map(|issue| issue.id().cloned().unwrap_or(Value::Null))
                .collect(),
            dry_run: args.dry_run,
            issues: touched.into_iter().cloned().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for issue in &touched {
        println!("{}", format_issue_line(issue));
    }
    let verb = verbs[usize::from(args.dry_run)];
    println!("{verb} {changed} issue(s) in {path}");
    Ok(())
}
