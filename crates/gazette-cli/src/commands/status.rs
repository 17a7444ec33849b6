//! Status command implementation.

use crate::cli::StatusArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use gazette_store::SqliteStore;

/// Execute the status command.
pub fn execute_status(args: StatusArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let store = SqliteStore::open_existing(&config.store.path)?;
    let marker = store.marker(&args.id)?;
    println!("{}", formatter.format_status(&args.id, marker.as_ref())?);
    Ok(())
}
