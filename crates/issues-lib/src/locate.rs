//! Issues file discovery.
//!
//! Resolution order:
//! 1. explicit path (must exist)
//! 2. `GIT_ISSUES_FILE` (used only if it points at an existing file)
//! 3. candidate filenames in the search root
//! 4. candidate filenames in `<root>/.git`
//! 5. shallow recursive scan of the root for a candidate filename

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IssuesError, Result};

/// Environment variable that overrides discovery.
pub const ENV_VAR: &str = "GIT_ISSUES_FILE";

/// Filenames checked, in order, relative to the search root.
pub const DEFAULT_CANDIDATES: [&str; 5] = [
    "git_issues.json",
    "GitIssues.json",
    "issues.json",
    "git-issues.json",
    "Git Issues.json",
];

/// Scan depth below the root: root files plus two directory levels.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Which rule produced a [`Resolved`] path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Explicit,
    Environment,
    Root,
    GitDir,
    Scan,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Environment => "environment",
            Self::Root => "root",
            Self::GitDir => "git_dir",
            Self::Scan => "scan",
        }
    }
}

/// A located issues file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub path: PathBuf,
    pub source: Source,
}

/// Builder that resolves the issues file path.
#[derive(Debug, Clone)]
pub struct Locator {
    explicit: Option<PathBuf>,
    env_override: Option<PathBuf>,
    root: Option<PathBuf>,
    candidates: Vec<String>,
    max_depth: usize,
}

impl Locator {
    /// Locator rooted at the current directory, honouring `GIT_ISSUES_FILE`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            explicit: None,
            env_override: env_override_from_process(),
            root: None,
            candidates: DEFAULT_CANDIDATES.iter().map(ToString::to_string).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use this path and nothing else.
    #[must_use]
    pub fn explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    #[must_use]
    pub fn search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Replace the value read from `GIT_ISSUES_FILE`.
    #[must_use]
    pub fn env_override(mut self, path: Option<PathBuf>) -> Self {
        self.env_override = path;
        self
    }

    #[must_use]
    pub fn candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// The directory discovery starts from.
    ///
    /// # Errors
    ///
    /// Returns `Io` if no root was set and the current directory is unavailable.
    pub fn root(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Resolve the issues file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if an explicit path does not exist, or
    /// `NotFound` if discovery finds nothing.
    pub fn locate(&self) -> Result<Resolved> {
        let resolved = self.resolve()?;
        debug!(
            path = %resolved.path.display(),
            source = resolved.source.as_str(),
            "Resolved issues file"
        );
        Ok(resolved)
    }

    fn resolve(&self) -> Result<Resolved> {
        if let Some(path) = &self.explicit {
            if !path.is_file() {
                return Err(IssuesError::FileNotFound(path.clone()));
            }
            return Ok(resolved(path.clone(), Source::Explicit));
        }

        if let Some(path) = self.env_override.as_ref().filter(|p| p.is_file()) {
            return Ok(resolved(path.clone(), Source::Environment));
        }

        let root = self.root()?;
        if let Some(path) = self.first_candidate_in(&root) {
            return Ok(resolved(path, Source::Root));
        }

        let git_dir = root.join(".git");
        if git_dir.is_dir() {
            if let Some(path) = self.first_candidate_in(&git_dir) {
                return Ok(resolved(path, Source::GitDir));
            }
        }

        if let Some(path) = self.scan(&root) {
            return Ok(resolved(path, Source::Scan));
        }

        Err(IssuesError::NotFound { root })
    }

    fn first_candidate_in(&self, dir: &Path) -> Option<PathBuf> {
        self.candidates
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Shallowest match wins; ties go to the first entry in file-name order.
    fn scan(&self, root: &Path) -> Option<PathBuf> {
        WalkDir::new(root)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.is_candidate(name))
            })
            .min_by_key(walkdir::DirEntry::depth)
            .map(walkdir::DirEntry::into_path)
    }

    fn is_candidate(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            && self.candidates.iter().any(|c| c == name)
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

fn resolved(path: PathBuf, source: Source) -> Resolved {
    Resolved { path, source }
}

fn env_override_from_process() -> Option<PathBuf> {
    std::env::var_os(ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
