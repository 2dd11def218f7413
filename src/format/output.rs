use issues_lib::{Issue, Source};
use serde::Serialize;
use serde_json::Value;

/// Result of `gi locate`.
#[derive(Debug, Clone, Serialize)]
pub struct LocateOutput {
    pub path: String,
    pub source: Source,
}

/// Result of `gi close` / `gi complete`.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutput {
    pub path: String,
    pub transition: &'static str,
    pub changed: usize,
    pub changed_ids: Vec<Value>,
    pub dry_run: bool,
    pub issues: Vec<Issue>,
}

/// Result of `gi version --json`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOutput<'a> {
    pub version: &'a str,
    pub build: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<&'a str>,
}
