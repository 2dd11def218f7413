//! Command-line interface for `git_issues`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{CliOverrides, Config};
use crate::logging;

/// `git_issues` (gi) - Git issues board helper.
#[derive(Parser, Debug)]
#[command(name = "gi")]
#[command(
    author,
    version,
    about = "List and update a JSON git issues board",
    long_about = None,
    after_help = "The issues file is taken from --file, then $GIT_ISSUES_FILE, then searched for under --root."
)]
pub struct Cli {
    /// Issues file to use (must exist)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory to search for the issues file (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which issues file would be used
    Locate,

    /// List open issues (open, opened, todo, backlog, in_progress)
    List,

    /// Close implemented issues
    Close(TransitionArgs),

    /// Mark open issues as completed
    Complete(TransitionArgs),

    /// Check the issues file for problems
    Doctor,

    /// Run the health-check HTTP service
    #[cfg(feature = "server")]
    Serve(ServeArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TransitionArgs {
    /// Report what would change without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default: $PORT or 5004)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Collect the command-line values that feed [`Config`].
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        #[cfg_attr(not(feature = "server"), allow(unused_mut))]
        let mut overrides = CliOverrides {
            file: self.file.clone(),
            root: self.root.clone(),
            ..CliOverrides::default()
        };
        #[cfg(feature = "server")]
        {
            if let Some(Commands::Serve(args)) = &self.command {
                overrides.host.clone_from(&args.host);
                overrides.port = args.port;
            }
        }
        overrides
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let overrides = cli.overrides();
    let config = Config::resolve(&overrides)?;

    match cli.command {
        Some(Commands::Locate) => commands::locate::execute(&config, cli.json),
        Some(Commands::List) => commands::list::execute(&config, cli.json),
        Some(Commands::Close(args)) => commands::transition::close(&config, &args, cli.json),
        Some(Commands::Complete(args)) => {
            commands::transition::complete(&config, &args, cli.json)
        }
        Some(Commands::Doctor) => commands::doctor::execute(&config, cli.json),
        #[cfg(feature = "server")]
        Some(Commands::Serve(_)) => commands::serve::execute(&overrides),
        Some(Commands::Version) => commands::version::execute(cli.json),
        None => {
            println!("gi - Git issues board helper. Use --help for usage.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gi", "close", "--dry-run", "--file", "x.json", "--json"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.file, Some(PathBuf::from("x.json")));
        match cli.command {
            Some(Commands::Close(args)) => assert!(args.dry_run),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_carry_file_and_root() {
        let cli = Cli::try_parse_from(["gi", "--root", "repo", "list"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.root, Some(PathBuf::from("repo")));
        assert!(overrides.file.is_none());
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_overrides_carry_serve_args() {
        let cli = Cli::try_parse_from(["gi", "serve", "--port", "8081", "--host", "127.0.0.1"])
            .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.port, Some(8081));
        assert_eq!(overrides.host.as_deref(), Some("127.0.0.1"));
    }
}
