//! Error types for `issues-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for issues-lib operations.
#[derive(Error, Debug)]
pub enum IssuesError {
    // === Discovery Errors ===
    /// An explicitly requested issues file does not exist.
    #[error("Issues file not found at {}", .0.display())]
    FileNotFound(PathBuf),

    /// No candidate file matched anywhere under the search root.
    #[error("Unable to locate a Git Issues JSON file under {}", root.display())]
    NotFound { root: PathBuf },

    // === Format Errors ===
    /// The file parsed as JSON but is not a list of objects.
    #[error("Invalid issues file {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// The file content is not valid JSON.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IssuesError {
    #[must_use]
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for both "explicit path missing" and "discovery exhausted".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::NotFound { .. })
    }
}

/// Result type using `IssuesError`.
pub type Result<T> = std::result::Result<T, IssuesError>;
