//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Implementations live in other crates: the search index
//! client in `gazette-search`, the oracle clients in `gazette-llm` and the
//! destination store in `gazette-store`.
//!
//! Every operation is blocking from the caller's point of view.

use crate::{ContractRecord, DeadLetter, Document, ProcessedMarker};

/// Source of gazette documents
///
/// Implemented by the infrastructure layer (gazette-search)
pub trait DocumentSource {
    /// Error type for source operations
    type Error;

    /// List document identifiers, at most `limit` of them
    fn list_ids(&self, limit: usize) -> Result<Vec<String>, Self::Error>;

    /// Fetch one document by identifier
    fn fetch(&self, id: &str) -> Result<Document, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (gazette-llm). The call may block
/// for a whole remote round trip; retries, if any, belong to the provider.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send a prompt and return the model's reply
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Remembers which documents were already processed
///
/// Implemented by the infrastructure layer (gazette-store)
pub trait ProcessedTracker {
    /// Error type for tracker operations
    type Error;

    /// Whether a marker exists for the document
    fn is_processed(&self, document_id: &str) -> Result<bool, Self::Error>;

    /// Write a marker for the document
    fn mark_processed(&mut self, marker: ProcessedMarker) -> Result<(), Self::Error>;
}

/// Destination for structured contract records
///
/// Insert-only: deduplication happens at document granularity through
/// [`ProcessedTracker`], never here.
pub trait ContractSink {
    /// Error type for sink operations
    type Error;

    /// Persist one record
    fn save(&mut self, record: ContractRecord) -> Result<(), Self::Error>;
}

/// Log of per-act failures
pub trait DeadLetterLog {
    /// Error type for log operations
    type Error;

    /// Record one failed act
    fn record(&mut self, letter: DeadLetter) -> Result<(), Self::Error>;
}
