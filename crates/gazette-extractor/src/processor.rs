//! Per-document pipeline and batch driver

use crate::classifier::ActClassifier;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::oracle;
use crate::parser::parse_contract_response;
use crate::prompt::PromptBuilder;
use crate::segmenter::ActSegmenter;
use crate::types::{ActFailure, BatchReport, DocumentOutcome, DocumentReport};
use gazette_domain::traits::{
    ContractSink, DeadLetterLog, DocumentSource, LlmProvider, ProcessedTracker,
};
use gazette_domain::{Act, DeadLetter, Document, FailureStage, ProcessedMarker};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives documents through segmentation, extraction and persistence
///
/// Documents and acts are handled strictly in order. A failing act never
/// stops its siblings, and a failing document never stops the batch.
pub struct Processor<D, L, S> {
    source: D,
    llm_provider: L,
    store: S,
    segmenter: ActSegmenter,
    classifier: ActClassifier,
    config: ExtractorConfig,
}

impl<D, L, S> Processor<D, L, S>
where
    D: DocumentSource,
    D::Error: Display,
    L: LlmProvider,
    L::Error: Display,
    S: ProcessedTracker + ContractSink + DeadLetterLog,
    <S as ProcessedTracker>::Error: Display,
    <S as ContractSink>::Error: Display,
    <S as DeadLetterLog>::Error: Display,
{
    /// Create a new Processor
    pub fn new(
        source: D,
        llm_provider: L,
        store: S,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let segmenter = ActSegmenter::new(config.noise_markers.clone())?;
        let classifier = ActClassifier::new(&config.excerpt_token, &config.contract_token);

        Ok(Self {
            source,
            llm_provider,
            store,
            segmenter,
            classifier,
            config,
        })
    }

    /// Destination store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the destination store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// List document ids from the source and process them
    pub fn run_all(&mut self) -> Result<BatchReport, ExtractorError> {
        let ids = self
            .source
            .list_ids(self.config.page_size)
            .map_err(|e| ExtractorError::Source(e.to_string()))?;

        if ids.is_empty() {
            info!("No documents found in the source");
            return Ok(BatchReport::default());
        }

        info!("Listed {} documents", ids.len());
        Ok(self.run(&ids))
    }

    /// Process the given documents in order
    pub fn run(&mut self, document_ids: &[String]) -> BatchReport {
        let start = Instant::now();
        let mut report = BatchReport::default();

        for id in document_ids {
            let document_report = match self.process_document(id) {
                Ok(document_report) => document_report,
                Err(e) => {
                    error!("Failed to process document {}: {}", id, e);
                    DocumentReport::new(id.as_str(), DocumentOutcome::Failed(e.to_string()))
                }
            };
            report.documents.push(document_report);
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;
        info!("Batch complete: {}", report.summary());
        report
    }

    /// Process one document
    ///
    /// Returns an error only when the document cannot be fetched. In that
    /// case no marker is written.
    pub fn process_document(&mut self, document_id: &str) -> Result<DocumentReport, ExtractorError> {
        let start = Instant::now();

        if self.already_processed(document_id) {
            info!("Document {} already processed, skipping", document_id);
            return Ok(DocumentReport::new(document_id, DocumentOutcome::AlreadyProcessed));
        }

        let document = self
            .source
            .fetch(document_id)
            .map_err(|e| ExtractorError::Source(e.to_string()))?;

        let acts = self.segmenter.segment(&document.text);
        if acts.is_empty() {
            let mut report = DocumentReport::new(document_id, DocumentOutcome::NoActs);
            if self.config.mark_empty_documents {
                report.marked = self.mark(document_id);
            } else {
                warn!(
                    "No acts found in document {}; left unmarked (set mark_empty_documents to mark it)",
                    document_id
                );
            }
            report.processing_time_ms = start.elapsed().as_millis() as u64;
            return Ok(report);
        }

        info!("Processing document {} with {} acts", document_id, acts.len());

        let mut report = DocumentReport::new(document_id, DocumentOutcome::Processed);
        report.acts_found = acts.len();

        for act in &acts {
            if !self.classifier.is_in_scope(&act.text) {
                debug!("Act {} is not a contract excerpt", act.code);
                continue;
            }
            report.acts_in_scope += 1;
            self.process_act(&document, act, &mut report);
        }

        report.marked = self.mark(document_id);
        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Document {}: {} in scope, {} saved, {} failed",
            document_id,
            report.acts_in_scope,
            report.records_saved,
            report.failures.len()
        );

        Ok(report)
    }

    /// Extract, parse and save one in-scope act
    fn process_act(&mut self, document: &Document, act: &Act, report: &mut DocumentReport) {
        let prompt = PromptBuilder::new(act, document).build();

        let result = oracle::extract(&self.llm_provider, &prompt);
        if !result.status.is_success() {
            self.record_failure(document, act, FailureStage::Extraction, result.text, report);
            return;
        }

        let record = match parse_contract_response(&result.text, &act.code) {
            Ok(record) => record,
            Err(e) => {
                self.record_failure(document, act, FailureStage::Parse, e.to_string(), report);
                return;
            }
        };

        match self.store.save(record) {
            Ok(()) => {
                debug!("Saved contract {} from document {}", act.code, document.id);
                report.records_saved += 1;
            }
            Err(e) => {
                self.record_failure(document, act, FailureStage::Persist, e.to_string(), report);
            }
        }
    }

    fn record_failure(
        &mut self,
        document: &Document,
        act: &Act,
        stage: FailureStage,
        reason: String,
        report: &mut DocumentReport,
    ) {
        warn!(
            "Act {} in document {} failed at {}: {}",
            act.code, document.id, stage, reason
        );

        if self.config.record_dead_letters {
            let letter = DeadLetter::new(document.id.as_str(), act.code.as_str(), stage, reason.as_str());
            if let Err(e) = self.store.record(letter) {
                warn!("Failed to record dead letter for act {}: {}", act.code, e);
            }
        }

        report.failures.push(ActFailure {
            act_code: act.code.to_string(),
            stage,
            reason,
        });
    }

    /// Check the marker; store errors count as "not processed"
    fn already_processed(&self, document_id: &str) -> bool {
        match self.store.is_processed(document_id) {
            Ok(processed) => processed,
            Err(e) => {
                warn!(
                    "Could not check marker for document {}, treating as not processed: {}",
                    document_id, e
                );
                false
            }
        }
    }

    /// Write the marker, returning whether it was written
    fn mark(&mut self, document_id: &str) -> bool {
        match self.store.mark_processed(ProcessedMarker::now(document_id)) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to mark document {} as processed: {}", document_id, e);
                false
            }
        }
    }
}
