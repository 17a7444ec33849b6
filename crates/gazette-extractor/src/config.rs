//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Default noise lines found in the Amazonas municipal gazette
pub const DEFAULT_NOISE_MARKERS: [&str; 2] =
    ["Amazonas, Quinta-feira", "Diário Oficial dos Municípios"];

/// Configuration for the contract pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Lines containing any of these substrings are removed before segmenting
    pub noise_markers: Vec<String>,

    /// Token marking a contract excerpt (matched case-insensitively)
    pub excerpt_token: String,

    /// Contract keyword (matched case-insensitively)
    pub contract_token: String,

    /// Maximum number of document ids listed by one batch run
    pub page_size: usize,

    /// Write a processed marker for documents with no segmented acts
    pub mark_empty_documents: bool,

    /// Record per-act failures in the dead-letter log
    pub record_dead_letters: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.noise_markers.iter().any(|m| m.is_empty()) {
            return Err("noise_markers must not contain empty strings".to_string());
        }
        if self.excerpt_token.trim().is_empty() || self.contract_token.trim().is_empty() {
            return Err("excerpt_token and contract_token must not be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("page_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            noise_markers: DEFAULT_NOISE_MARKERS.iter().map(|m| m.to_string()).collect(),
            excerpt_token: "extrato".to_string(),
            contract_token: "contrato".to_string(),
            page_size: 1000,
            mark_empty_documents: false,
            record_dead_letters: true,
        }
    }
}
