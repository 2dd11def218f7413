use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory that `gi` runs in.
pub struct IssuesWorkspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl IssuesWorkspace {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Write `value` as JSON to `relative` (parent directories created).
    pub fn write_issues(&self, relative: &str, value: &Value) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, serde_json::to_string(value).expect("serialize")).expect("write issues");
        path
    }

    pub fn read_json(&self, path: &Path) -> Value {
        serde_json::from_str(&self.read(path)).expect("valid json")
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read file")
    }
}

pub struct GiOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl GiOutput {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).expect("stdout is json")
    }
}

/// Base command: runs in the workspace root with discovery env cleared.
pub fn gi_command(workspace: &IssuesWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("gi").expect("gi binary");
    cmd.current_dir(&workspace.root)
        .env_remove("GIT_ISSUES_FILE")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_gi<I, S>(workspace: &IssuesWorkspace, args: I, label: &str) -> GiOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_gi_with_env(workspace, args, &[], label)
}

pub fn run_gi_with_env<I, S>(
    workspace: &IssuesWorkspace,
    args: I,
    env: &[(&str, &OsStr)],
    label: &str,
) -> GiOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = gi_command(workspace);
    cmd.args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("run gi");
    let result = GiOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] gi exited with {}\nstderr:\n{}", result.status, result.stderr);
    }
    result
}
