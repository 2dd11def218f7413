//! One-call helpers over the default [`Locator`].
//!
//! Every helper takes an optional explicit file path. Passing `None` falls
//! back to `GIT_ISSUES_FILE` and then to discovery from the current directory.
//! Mutating helpers given an in-memory list change it in place and never
//! write; given `None` they load the file, mutate, and save it back.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::Result;
use crate::file;
use crate::locate::Locator;
use crate::model::Issue;
use crate::query::{self, Transition};
use crate::store::IssueStore;

fn locator_for(file_path: Option<&Path>) -> Locator {
    match file_path {
        Some(path) => Locator::new().explicit(path),
        None => Locator::new(),
    }
}

/// Resolve the issues file path.
///
/// # Errors
///
/// Returns `FileNotFound` for a missing explicit path, `NotFound` otherwise.
pub fn find_issues_file(explicit: Option<&Path>) -> Result<PathBuf> {
    Ok(locator_for(explicit).locate()?.path)
}

/// Load every issue from the resolved file.
///
/// # Errors
///
/// Returns a not-found, JSON or format error.
pub fn load_issues(file_path: Option<&Path>) -> Result<Vec<Issue>> {
    Ok(IssueStore::discover(&locator_for(file_path))?.into_issues())
}

/// Write `issues` to the resolved file, which must already exist.
/// Returns the path written.
///
/// # Errors
///
/// Returns a not-found error if no file resolves, or `Io` on write failure.
pub fn save_issues(issues: &[Issue], file_path: Option<&Path>) -> Result<PathBuf> {
    let path = find_issues_file(file_path)?;
    file::save(&path, issues)?;
    Ok(path)
}

/// Issues whose status is open, opened, todo, backlog or in_progress.
///
/// # Errors
///
/// Only fails when `issues` is `None` and the file cannot be loaded.
pub fn list_open_issues(issues: Option<&[Issue]>, file_path: Option<&Path>) -> Result<Vec<Issue>> {
    let loaded;
    let issues = match issues {
        Some(issues) => issues,
        None => {
            loaded = load_issues(file_path)?;
            &loaded
        }
    };
    Ok(query::open_issues(issues).into_iter().cloned().collect())
}

/// Mark implemented issues closed and stamp `closed_at`.
/// Returns the full updated list.
///
/// # Errors
///
/// Only fails when `issues` is `None` and the file cannot be loaded or saved.
pub fn close_implemented_issues(
    issues: Option<&mut [Issue]>,
    file_path: Option<&Path>,
) -> Result<Vec<Issue>> {
    transition(issues, file_path, query::CLOSE_IMPLEMENTED)
}

/// Mark open / opened issues completed and stamp `completed_at`.
/// Returns the full updated list.
///
/// # Errors
///
/// Only fails when `issues` is `None` and the file cannot be loaded or saved.
pub fn complete_open_issues(
    issues: Option<&mut [Issue]>,
    file_path: Option<&Path>,
) -> Result<Vec<Issue>> {
    transition(issues, file_path, query::COMPLETE_OPEN)
}

fn transition(
    issues: Option<&mut [Issue]>,
    file_path: Option<&Path>,
    transition: Transition,
) -> Result<Vec<Issue>> {
    let now = Utc::now();
    if let Some(issues) = issues {
        query::apply(issues, transition, now);
        return Ok(issues.to_vec());
    }

    let mut store = IssueStore::discover(&locator_for(file_path))?;
    store.apply(transition, now);
    store.save()?;
    Ok(store.into_issues())
}
