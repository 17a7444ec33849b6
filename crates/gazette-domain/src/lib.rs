//! Gazette Domain Layer
//!
//! Core data model for extracting government-contract notices from
//! official-gazette documents. It has ZERO external dependencies and defines
//! the value types and trait interfaces that every other crate depends upon.
//!
//! ## Key Concepts
//!
//! - **Document**: one indexed gazette page holding zero or more acts
//! - **Act**: a single administrative notice tagged by a 9-character identifier code
//! - **ContractRecord**: the structured fields extracted from one contract act
//! - **ProcessedMarker**: proof that a document went through the pipeline
//! - **DeadLetter**: a per-act failure kept aside for manual reprocessing
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and validation only
//! - Search index, oracle and database clients live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod act;
pub mod contract;
pub mod document;
pub mod extraction;
pub mod marker;
pub mod traits;

// Re-exports for convenience
pub use act::{Act, ActCode};
pub use contract::ContractRecord;
pub use document::{Document, MetadataKey};
pub use extraction::{ExtractionResult, ExtractionStatus};
pub use marker::{unix_timestamp, DeadLetter, FailureStage, ProcessedMarker};
