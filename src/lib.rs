//! `git_issues` - Git issues board helper
//!
//! This crate provides the `gi` CLI on top of [`issues_lib`], which owns
//! file discovery, loading/saving and the status transitions.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Discovery and serve settings from flags and environment
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup
//! - `server` - Health-check HTTP stub (feature `server`)

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
#[cfg(feature = "server")]
pub mod server;

pub use issues_lib::{IssuesError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
