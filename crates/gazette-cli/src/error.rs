//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search index error
    #[error("Search error: {0}")]
    Search(#[from] gazette_search::SearchError),

    /// Assistant client error
    #[error("LLM error: {0}")]
    Llm(#[from] gazette_llm::LlmError),

    /// Destination store error
    #[error("Store error: {0}")]
    Store(#[from] gazette_store::StoreError),

    /// Pipeline error
    #[error("Extractor error: {0}")]
    Extractor(#[from] gazette_extractor::ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The blocking batch task did not complete
    #[error("Batch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
