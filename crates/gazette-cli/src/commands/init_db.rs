//! Init-db command implementation.

use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use gazette_store::SqliteStore;

/// Execute the init-db command.
pub fn execute_init_db(config: &AppConfig, formatter: &Formatter) -> Result<()> {
    SqliteStore::new(&config.store.path)?;
    println!(
        "{}",
        formatter.success(&format!("Store ready at {}", config.store.path.display()))
    );
    Ok(())
}
