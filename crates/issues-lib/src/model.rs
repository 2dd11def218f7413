//! Core data types for issues-lib.
//!
//! An [`Issue`] keeps the whole JSON object it was loaded from so that fields
//! this crate does not know about survive a load/save cycle untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Key used by custom exports.
pub const STATUS_KEY: &str = "status";
/// Key used by the GitHub API.
pub const STATE_KEY: &str = "state";
/// Stamped when an implemented issue is closed.
pub const CLOSED_AT_KEY: &str = "closed_at";
/// Stamped when an open issue is completed.
pub const COMPLETED_AT_KEY: &str = "completed_at";

/// Lower-case and trim a status value.
///
/// A missing status normalizes to the empty string, which never matches any
/// status set.
#[must_use]
pub fn normalize_status(status: Option<&str>) -> String {
    status.map_or_else(String::new, |s| s.trim().to_lowercase())
}

/// Format a timestamp the way `closed_at` / `completed_at` are written:
/// ISO 8601, microseconds, explicit `+00:00` offset.
#[must_use]
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Classified issue status, derived from the normalized status string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No status under either key, or only whitespace.
    #[default]
    Missing,
    Open,
    Opened,
    Todo,
    Backlog,
    InProgress,
    Implemented,
    Closed,
    Completed,
    Custom(String),
}

impl Status {
    /// Classify a raw status value (trimmed and lower-cased first).
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        Self::from_normalized(normalize_status(raw))
    }

    fn from_normalized(normalized: String) -> Self {
        match normalized.as_str() {
            "" => Self::Missing,
            "open" => Self::Open,
            "opened" => Self::Opened,
            "todo" => Self::Todo,
            "backlog" => Self::Backlog,
            "in_progress" => Self::InProgress,
            "implemented" => Self::Implemented,
            "closed" => Self::Closed,
            "completed" => Self::Completed,
            _ => Self::Custom(normalized),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Missing => "",
            Self::Open => "open",
            Self::Opened => "opened",
            Self::Todo => "todo",
            Self::Backlog => "backlog",
            Self::InProgress => "in_progress",
            Self::Implemented => "implemented",
            Self::Closed => "closed",
            Self::Completed => "completed",
            Self::Custom(value) => value,
        }
    }

    /// Statuses reported by `list_open_issues`.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(
            self,
            Self::Open | Self::Opened | Self::Todo | Self::Backlog | Self::InProgress
        )
    }

    /// Statuses that `complete_open_issues` moves to `completed`.
    #[must_use]
    pub const fn is_completable(&self) -> bool {
        matches!(self, Self::Open | Self::Opened)
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Implemented | Self::Closed | Self::Completed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(Some(s)))
    }
}

/// A single issue record.
///
/// Serializes as the underlying JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issue {
    fields: Map<String, Value>,
}

impl Issue {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The `id` value; ids are commonly numbers but strings are accepted too.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// The string value stored under `key`. Non-string values count as absent.
    #[must_use]
    pub fn raw_status(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Effective status: `status` first, then `state` when `status` is empty.
    #[must_use]
    pub fn status(&self) -> Status {
        match Status::parse(self.raw_status(STATUS_KEY)) {
            Status::Missing => Status::parse(self.raw_status(STATE_KEY)),
            status => status,
        }
    }

    /// Write `status` to both `status` and `state` so the two stay in sync.
    pub fn set_status(&mut self, status: &str) {
        self.set(STATUS_KEY, status);
        self.set(STATE_KEY, status);
    }

    /// Insert `key` only if it is not present yet (even as `null`).
    ///
    /// Returns `true` when the value was inserted.
    pub fn stamp_if_absent(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        if self.fields.contains_key(key) {
            return false;
        }
        self.fields.insert(key.to_string(), Value::String(timestamp(now)));
        true
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Issue {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
