//! `git_issues` (gi) - Git issues board helper
//!
//! Lists open issues in a JSON issues file and moves implemented/open issues
//! to their closed/completed states.

use git_issues::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
