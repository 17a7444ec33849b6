//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while extracting contracts
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Document source error (listing or fetching)
    #[error("Source error: {0}")]
    Source(String),

    /// Oracle response was not a JSON object
    #[error("Invalid contract format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::Config(format!("invalid act marker pattern: {}", e))
    }
}
