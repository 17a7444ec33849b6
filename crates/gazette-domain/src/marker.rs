//! Processed markers and dead letters

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current time in seconds since the Unix epoch
///
/// A clock set before 1970 yields 0.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Record that a document went through the pipeline
///
/// Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedMarker {
    /// Identifier of the processed document
    pub document_id: String,

    /// When processing finished (Unix seconds)
    pub processed_at: u64,
}

impl ProcessedMarker {
    /// Marker stamped with the current time
    pub fn now(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            processed_at: unix_timestamp(),
        }
    }
}

/// Pipeline stage at which an act failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// The oracle call failed
    Extraction,
    /// The oracle reply was not a valid record
    Parse,
    /// The record could not be written
    Persist,
}

impl FailureStage {
    /// Stable lowercase name used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Extraction => "extraction",
            FailureStage::Parse => "parse",
            FailureStage::Persist => "persist",
        }
    }

    /// Parse a stored stage name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "extraction" => Ok(FailureStage::Extraction),
            "parse" => Ok(FailureStage::Parse),
            "persist" => Ok(FailureStage::Persist),
            other => Err(format!("Unknown failure stage: {}", other)),
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-act failure kept aside for later reprocessing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLetter {
    /// Document the act belongs to
    pub document_id: String,

    /// Identifier code of the failed act
    pub act_code: String,

    /// Stage that failed
    pub stage: FailureStage,

    /// Human-readable reason
    pub reason: String,

    /// When the failure was recorded (Unix seconds)
    pub recorded_at: u64,
}

impl DeadLetter {
    /// Dead letter stamped with the current time
    pub fn new(
        document_id: impl Into<String>,
        act_code: impl Into<String>,
        stage: FailureStage,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            act_code: act_code.into(),
            stage,
            reason: reason.into(),
            recorded_at: unix_timestamp(),
        }
    }
}
