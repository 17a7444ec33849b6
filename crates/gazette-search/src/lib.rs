//! Gazette Search Layer
//!
//! Implements the `DocumentSource` trait over an Elasticsearch-compatible REST
//! API. Gazette documents are stored one per index entry, with the full text
//! in one field and the publishing metadata in a nested object:
//!
//! ```json
//! { "texto_doe": "...", "metadados": { "idPost": 4411, "postDate": "...", "postTitle": "...", "urlPdfDoe": "..." } }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use gazette_search::{ElasticSource, SearchConfig};
//! use gazette_domain::traits::DocumentSource;
//!
//! let source = ElasticSource::new(SearchConfig::default()).unwrap();
//! for id in source.list_ids(1000).unwrap() {
//!     let document = source.fetch(&id).unwrap();
//!     println!("{}: {} chars", document.id, document.text.len());
//! }
//! ```

#![warn(missing_docs)]

mod config;

pub use config::SearchConfig;

use gazette_domain::traits::DocumentSource;
use gazette_domain::Document;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while talking to the search index
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The index answered with an error status
    #[error("Search index returned {status}: {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// No document with the requested id
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Source configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Deserialize)]
struct GetResponse {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source", default)]
    source: Map<String, Value>,
}

/// Document source backed by an Elasticsearch index
pub struct ElasticSource {
    config: SearchConfig,
    base: Url,
    client: Client,
}

impl ElasticSource {
    /// Create a source from validated configuration
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::Config)?;

        let base = Url::parse(&config.endpoint)
            .map_err(|e| SearchError::Config(format!("Invalid endpoint '{}': {}", config.endpoint, e)))?;
        if base.cannot_be_a_base() {
            return Err(SearchError::Config(format!(
                "Endpoint '{}' cannot be used as a base URL",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            config,
            base,
            client,
        })
    }

    /// Configuration this source was built with
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build `{endpoint}/{index}/{segments...}` with every segment escaped
    fn index_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(&self.config.index);
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(username) if !username.is_empty() => {
                request.basic_auth(username, self.config.password.as_deref())
            }
            _ => request,
        }
    }

    fn check_status(response: Response) -> Result<Response, SearchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(SearchError::Server {
            status: status.as_u16(),
            body,
        })
    }

    fn document_from_source(&self, id: String, mut source: Map<String, Value>) -> Document {
        let text = match source.remove(&self.config.text_field) {
            Some(Value::String(text)) => text,
            _ => String::new(),
        };

        let metadata = match source.remove(&self.config.metadata_field) {
            Some(Value::Object(fields)) => fields
                .into_iter()
                .filter_map(|(key, value)| value_to_text(value).map(|v| (key, v)))
                .collect(),
            _ => BTreeMap::new(),
        };

        Document { id, text, metadata }
    }
}

/// Render a metadata value as text; `null` is dropped
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl DocumentSource for ElasticSource {
    type Error = SearchError;

    fn list_ids(&self, limit: usize) -> Result<Vec<String>, Self::Error> {
        let url = self.index_url(&["_search"]);
        let body = serde_json::json!({
            "query": { "match_all": {} },
            "size": limit,
            "_source": false,
        });

        debug!(url = %url, limit, "Listing document ids");
        let response = self.authorize(self.client.post(url).json(&body)).send()?;
        let parsed: SearchResponse = Self::check_status(response)?
            .json()
            .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse search response: {}", e)))?;

        let ids: Vec<String> = parsed.hits.hits.into_iter().map(|hit| hit.id).collect();
        info!(index = %self.config.index, count = ids.len(), "Listed document ids");
        Ok(ids)
    }

    fn fetch(&self, id: &str) -> Result<Document, Self::Error> {
        let url = self.index_url(&["_doc", id]);

        debug!(url = %url, "Fetching document");
        let response = self.authorize(self.client.get(url)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound(id.to_string()));
        }

        let parsed: GetResponse = Self::check_status(response)?
            .json()
            .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse document '{}': {}", id, e)))?;

        if !parsed.found {
            return Err(SearchError::NotFound(id.to_string()));
        }

        Ok(self.document_from_source(parsed.id, parsed.source))
    }
}
