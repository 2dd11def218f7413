//! Locate command implementation.

use anyhow::Result;

use crate::config::Config;
use crate::format::LocateOutput;

/// Execute the locate command.
///
/// # Errors
///
/// Returns an error if no issues file can be found.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let resolved = config.locator().locate()?;
    let output = LocateOutput {
        path: resolved.path.display().to_string(),
        source: resolved.source,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} ({})", output.path, output.source.as_str());
    }
    Ok(())
}
