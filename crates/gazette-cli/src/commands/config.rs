//! Config command implementation.

use crate::cli::CliFormat;
use crate::config::AppConfig;
use crate::error::Result;

/// Execute the config command: print the effective configuration.
pub fn execute_config(config: &AppConfig, format: CliFormat) -> Result<()> {
    let redacted = config.redacted();
    let output = match format {
        CliFormat::Json => serde_json::to_string_pretty(&redacted)?,
        CliFormat::Table => redacted.to_toml()?,
    };
    println!("{}", output);
    Ok(())
}
