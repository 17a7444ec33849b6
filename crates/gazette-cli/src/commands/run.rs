//! Run and process command implementations.

use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use gazette_extractor::{BatchReport, Processor};
use gazette_llm::AssistantProvider;
use gazette_search::ElasticSource;
use gazette_store::SqliteStore;
use tracing::info;

/// Execute the run command: every document listed by the index.
pub async fn execute_run(config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let report = spawn_batch(config, None).await?;
    println!("{}", formatter.format_batch(&report)?);
    Ok(())
}

/// Execute the process command: only the given documents.
pub async fn execute_process(
    ids: Vec<String>,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    let report = spawn_batch(config, Some(ids)).await?;
    println!("{}", formatter.format_batch(&report)?);
    Ok(())
}

/// Run the blocking pipeline off the async runtime.
///
/// The blocking HTTP clients must be created and dropped on that thread too,
/// so the whole collaborator set is built inside the task.
async fn spawn_batch(config: &AppConfig, ids: Option<Vec<String>>) -> Result<BatchReport> {
    config.validate()?;
    let config = config.clone();
    tokio::task::spawn_blocking(move || run_batch(&config, ids)).await?
}

fn run_batch(config: &AppConfig, ids: Option<Vec<String>>) -> Result<BatchReport> {
    let source = ElasticSource::new(config.search.clone())?;
    let llm = AssistantProvider::new(config.assistant.clone())?;
    let store = SqliteStore::new(&config.store.path)?;

    info!(
        "Starting batch: index '{}', assistant '{}', store '{}'",
        source.config().index,
        llm.assistant_id(),
        config.store.path.display()
    );

    let mut processor = Processor::new(source, llm, store, config.extractor.clone())?;
    let report = match ids {
        Some(ids) => processor.run(&ids),
        None => processor.run_all()?,
    };
    Ok(report)
}
