//! List command implementation.
//!
//! Shows issues whose status (under `status`, else `state`) is open, opened,
//! todo, backlog or in_progress, in file order.

use anyhow::Result;
use issues_lib::IssueStore;

use crate::config::Config;
use crate::format::format_issue_line;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the issues file cannot be located or loaded.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let store = IssueStore::discover(&config.locator())?;
    let open = store.open_issues();

    if json {
        println!("{}", serde_json::to_string_pretty(&open)?);
    } else if open.is_empty() {
        println!("No open issues.");
    } else {
        for issue in &open {
            println!("{}", format_issue_line(issue));
        }
        println!("\n{} open issue(s)", open.len());
    }

    Ok(())
}
