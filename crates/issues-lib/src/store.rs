//! In-memory issue store.
//!
//! Holds the ordered issue list loaded from one file, applies status
//! transitions, and writes the list back on request.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{IssuesError, Result};
use crate::file;
use crate::locate::{Locator, Resolved};
use crate::model::Issue;
use crate::query::{self, Transition};

/// In-memory git issues store.
///
/// Use `open()` or `discover()` to load from disk and `save()` to persist
/// back to the same file.
#[derive(Debug, Clone, Default)]
pub struct IssueStore {
    issues: Vec<Issue>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Wrap an in-memory list that is not tied to any file.
    #[must_use]
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            path: None,
            dirty: false,
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            issues: file::load(path)?,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Locate the file with `locator`, then load it.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if discovery fails, or any load error.
    pub fn discover(locator: &Locator) -> Result<Self> {
        let Resolved { path, .. } = locator.locate()?;
        Self::open(path)
    }

    /// Save to the file that was opened.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the store has no file, or `Io` on write failure.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| IssuesError::Config("No file path set; use save_to()".to_string()))?;
        self.save_to(path)
    }

    /// Save to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
        file::save(path.as_ref(), &self.issues)?;
        self.dirty = false;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    #[must_use]
    pub fn open_issues(&self) -> Vec<&Issue> {
        query::open_issues(&self.issues)
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Close implemented issues. Returns the number changed.
    pub fn close_implemented(&mut self, now: DateTime<Utc>) -> usize {
        self.apply(query::CLOSE_IMPLEMENTED, now)
    }

    /// Complete open / opened issues. Returns the number changed.
    pub fn complete_open(&mut self, now: DateTime<Utc>) -> usize {
        self.apply(query::COMPLETE_OPEN, now)
    }

    /// Apply any [`Transition`]. Returns the number changed.
    pub fn apply(&mut self, transition: Transition, now: DateTime<Utc>) -> usize {
        let changed = query::apply(&mut self.issues, transition, now);
        if changed > 0 {
            self.dirty = true;
            info!(transition = transition.name, changed, "Applied status transition");
        } else {
            debug!(transition = transition.name, "No issues matched transition");
        }
        changed
    }

    // ========================================================================
    // Dirty tracking
    // ========================================================================

    /// True when a mutation changed at least one issue since the last save.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}
