//! Configuration management for the CLI.

use crate::cli::SecretArgs;
use crate::error::{CliError, Result};
use gazette_extractor::ExtractorConfig;
use gazette_llm::AssistantConfig;
use gazette_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const REDACTED: &str = "********";

/// Full application configuration, one section per component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search index holding the gazette documents
    pub search: SearchConfig,

    /// Extraction assistant
    pub assistant: AssistantConfig,

    /// Destination store
    pub store: StoreSettings,

    /// Pipeline behavior
    pub extractor: ExtractorConfig,
}

/// Destination store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gazette.db"),
        }
    }
}

impl AppConfig {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gazette").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply secrets given on the command line or through the environment.
    pub fn apply_secrets(&mut self, secrets: &SecretArgs) {
        if let Some(password) = &secrets.search_password {
            self.search.password = Some(password.clone());
        }
        if let Some(api_key) = &secrets.api_key {
            self.assistant.api_key = api_key.clone();
        }
        if let Some(assistant_id) = &secrets.assistant_id {
            self.assistant.assistant_id = assistant_id.clone();
        }
    }

    /// Validate the sections needed for a batch run.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .and_then(|_| self.assistant.validate())
            .and_then(|_| self.extractor.validate())
            .map_err(CliError::Config)
    }

    /// Copy of the configuration with secrets masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.search.password.is_some() {
            config.search.password = Some(REDACTED.to_string());
        }
        if !config.assistant.api_key.is_empty() {
            config.assistant.api_key = REDACTED.to_string();
        }
        config
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}
