//! Version command implementation.

use anyhow::Result;

use crate::format::VersionOutput;

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    let mut features = Vec::new();
    if cfg!(feature = "server") {
        features.push("server");
    }

    if json {
        let output = VersionOutput {
            version,
            build,
            features,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("gi {version} ({build})");
    }
    Ok(())
}
