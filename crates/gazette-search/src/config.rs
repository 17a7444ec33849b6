//! Configuration for the search index client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection and layout settings for the gazette index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the cluster (e.g., "http://localhost:9200")
    pub endpoint: String,

    /// Index holding the gazette documents
    pub index: String,

    /// Basic-auth user; no auth header is sent when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Source field holding the full text
    pub text_field: String,

    /// Source field holding the metadata object
    pub metadata_field: String,

    /// Timeout for each HTTP request (seconds)
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9200".to_string(),
            index: "diario-oficial".to_string(),
            username: None,
            password: None,
            text_field: "texto_doe".to_string(),
            metadata_field: "metadados".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("search endpoint must not be empty".to_string());
        }
        if self.index.trim().is_empty() {
            return Err("search index must not be empty".to_string());
        }
        if self.text_field.is_empty() || self.metadata_field.is_empty() {
            return Err("text_field and metadata_field must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
