//! Per-document and per-batch processing reports

use gazette_domain::FailureStage;
use serde::Serialize;

/// How processing of one document ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum DocumentOutcome {
    /// A marker already existed; nothing was done
    AlreadyProcessed,
    /// No act markers were found in the text
    NoActs,
    /// The act loop ran to completion
    Processed,
    /// The document could not be handled (fetch failure)
    Failed(String),
}

impl DocumentOutcome {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            DocumentOutcome::AlreadyProcessed => "already_processed",
            DocumentOutcome::NoActs => "no_acts",
            DocumentOutcome::Processed => "processed",
            DocumentOutcome::Failed(_) => "failed",
        }
    }
}

/// One act that was dropped
#[derive(Debug, Clone, Serialize)]
pub struct ActFailure {
    /// Identifier code of the act
    pub act_code: String,

    /// Pipeline step that failed
    #[serde(serialize_with = "serialize_stage")]
    pub stage: FailureStage,

    /// Reason for failure
    pub reason: String,
}

fn serialize_stage<S: serde::Serializer>(stage: &FailureStage, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(stage.as_str())
}

/// Result of processing one document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Document identifier
    pub document_id: String,

    /// How processing ended
    #[serde(flatten)]
    pub outcome: DocumentOutcome,

    /// Acts segmented from the text
    pub acts_found: usize,

    /// Acts that passed the classifier
    pub acts_in_scope: usize,

    /// Records written to the sink
    pub records_saved: usize,

    /// Acts dropped along the way
    pub failures: Vec<ActFailure>,

    /// Whether a processed marker was written during this pass
    pub marked: bool,

    /// Processing duration in milliseconds
    pub processing_time_ms: u64,
}

impl DocumentReport {
    /// Empty report for a document with the given outcome
    pub fn new(document_id: impl Into<String>, outcome: DocumentOutcome) -> Self {
        Self {
            document_id: document_id.into(),
            outcome,
            acts_found: 0,
            acts_in_scope: 0,
            records_saved: 0,
            failures: Vec::new(),
            marked: false,
            processing_time_ms: 0,
        }
    }
}

/// Result of one batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Per-document reports, in processing order
    pub documents: Vec<DocumentReport>,

    /// Total duration in milliseconds
    pub processing_time_ms: u64,
}

impl BatchReport {
    fn count(&self, label: &str) -> usize {
        self.documents
            .iter()
            .filter(|d| d.outcome.label() == label)
            .count()
    }

    /// Documents whose act loop completed during this run
    pub fn processed(&self) -> usize {
        self.count("processed")
    }

    /// Documents skipped because they were already marked
    pub fn skipped(&self) -> usize {
        self.count("already_processed")
    }

    /// Documents without any act
    pub fn empty(&self) -> usize {
        self.count("no_acts")
    }

    /// Documents that failed as a whole
    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    /// Records written across the batch
    pub fn records_saved(&self) -> usize {
        self.documents.iter().map(|d| d.records_saved).sum()
    }

    /// Acts dropped across the batch
    pub fn act_failures(&self) -> usize {
        self.documents.iter().map(|d| d.failures.len()).sum()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        format!(
            "Documents: {} (processed: {}, skipped: {}, empty: {}, failed: {}), \
             Records saved: {}, Act failures: {}, Duration: {}ms",
            self.documents.len(),
            self.processed(),
            self.skipped(),
            self.empty(),
            self.failed(),
            self.records_saved(),
            self.act_failures(),
            self.processing_time_ms,
        )
    }
}
