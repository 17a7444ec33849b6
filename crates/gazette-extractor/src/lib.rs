//! Gazette Extractor
//!
//! Turns official-gazette documents into structured contract records.
//!
//! # Overview
//!
//! A gazette document is one long text holding many administrative acts, each
//! closed by a `Código Identificador: XXXXXXXXX` marker. The extractor splits
//! the text into acts, keeps the contract excerpts, asks an LLM assistant to
//! structure each one and writes the result to the destination store. Every
//! document is marked once its acts were handled, so repeated runs skip it.
//!
//! # Architecture
//!
//! ```text
//! DocumentSource → ActSegmenter → ActClassifier → PromptBuilder
//!     → LlmProvider → parser → ContractSink → ProcessedTracker
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use gazette_extractor::{ExtractorConfig, Processor};
//! use gazette_llm::MockProvider;
//! use gazette_search::{ElasticSource, SearchConfig};
//! use gazette_store::SqliteStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ElasticSource::new(SearchConfig::default())?;
//! let llm = MockProvider::new("{}");
//! let store = SqliteStore::new("gazette.db")?;
//!
//! let mut processor = Processor::new(source, llm, store, ExtractorConfig::default())?;
//! let report = processor.run_all()?;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
pub mod oracle;
mod parser;
mod processor;
mod prompt;
mod segmenter;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::ActClassifier;
pub use config::{ExtractorConfig, DEFAULT_NOISE_MARKERS};
pub use error::ExtractorError;
pub use parser::parse_contract_response;
pub use processor::Processor;
pub use prompt::{PromptBuilder, NOT_AVAILABLE};
pub use segmenter::{ActSegmenter, ACT_MARKER_PATTERN};
pub use types::{ActFailure, BatchReport, DocumentOutcome, DocumentReport};
