//! `issues-lib` — read and update a JSON list of git issues.
//!
//! The issues file is a JSON array of objects with `id`, `title` and a
//! status under `status` or `state`. It is found by explicit path,
//! the `GIT_ISSUES_FILE` environment variable, or a filename search.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::Utc;
//! use issues_lib::{IssueStore, Locator};
//!
//! // Find and load the file
//! let mut store = IssueStore::discover(&Locator::new()).unwrap();
//!
//! // Query
//! for issue in store.open_issues() {
//!     println!("{:?}", issue.title());
//! }
//!
//! // Update
//! store.close_implemented(Utc::now());
//!
//! // Save back
//! store.save().unwrap();
//! ```

pub mod api;
pub mod error;
pub mod file;
pub mod locate;
pub mod model;
pub mod query;
pub mod store;

pub use api::{
    close_implemented_issues, complete_open_issues, find_issues_file, list_open_issues,
    load_issues, save_issues,
};
pub use error::{IssuesError, Result};
pub use locate::{Locator, Resolved, Source};
pub use model::{Issue, Status, normalize_status};
pub use store::IssueStore;
