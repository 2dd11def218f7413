//! Status queries and bulk status transitions over issue slices.
//!
//! Nothing here touches the file system.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::model::{CLOSED_AT_KEY, COMPLETED_AT_KEY, Issue, Status};

/// A bulk status change: every issue whose effective status passes `applies`
/// is moved to `target` and gets `stamp` if it does not have one.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub name: &'static str,
    pub target: &'static str,
    pub stamp: &'static str,
    applies: fn(&Status) -> bool,
}

impl Transition {
    #[must_use]
    pub fn applies_to(&self, issue: &Issue) -> bool {
        (self.applies)(&issue.status())
    }
}

fn is_implemented(status: &Status) -> bool {
    *status == Status::Implemented
}

/// `implemented` -> `closed`, stamping `closed_at`.
pub const CLOSE_IMPLEMENTED: Transition = Transition {
    name: "close_implemented",
    target: "closed",
    stamp: CLOSED_AT_KEY,
    applies: is_implemented,
};

/// `open` / `opened` -> `completed`, stamping `completed_at`.
pub const COMPLETE_OPEN: Transition = Transition {
    name: "complete_open",
    target: "completed",
    stamp: COMPLETED_AT_KEY,
    applies: Status::is_completable,
};

/// Issues whose effective status is open-like, in file order.
#[must_use]
pub fn open_issues(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|issue| issue.status().is_open()).collect()
}

/// Apply `transition` in place. Returns how many issues matched.
pub fn apply(issues: &mut [Issue], transition: Transition, now: DateTime<Utc>) -> usize {
    let mut changed = 0;
    for issue in issues.iter_mut().filter(|issue| transition.applies_to(issue)) {
        issue.set_status(transition.target);
        issue.stamp_if_absent(transition.stamp, now);
        debug!(id = ?issue.id(), transition = transition.name, "Updated issue status");
        changed += 1;
    }
    changed
}

/// Close every implemented issue.
pub fn close_implemented(issues: &mut [Issue], now: DateTime<Utc>) -> usize {
    apply(issues, CLOSE_IMPLEMENTED, now)
}

/// Complete every open / opened issue.
pub fn complete_open(issues: &mut [Issue], now: DateTime<Utc>) -> usize {
    apply(issues, COMPLETE_OPEN, now)
}
