//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use gazette_domain::{Act, ProcessedMarker};
use gazette_extractor::{BatchReport, DocumentOutcome};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One segmented act as shown by the `segment` command.
pub struct ActView<'a> {
    /// The act
    pub act: &'a Act,
    /// Whether the classifier keeps it
    pub in_scope: bool,
    /// Prompt that would be sent to the assistant
    pub prompt: String,
}

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a batch report.
    pub fn format_batch(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            CliFormat::Table => Ok(self.format_batch_table(report)),
        }
    }

    fn format_batch_table(&self, report: &BatchReport) -> String {
        if report.documents.is_empty() {
            return self.warning("No documents processed.");
        }

        let mut builder = Builder::default();
        builder.push_record(["Document", "Outcome", "Acts", "In scope", "Saved", "Failed", "Marked"]);

        for doc in &report.documents {
            let outcome = match &doc.outcome {
                DocumentOutcome::Failed(reason) => format!("failed: {}", reason),
                other => other.label().to_string(),
            };
            builder.push_record([
                doc.document_id.clone(),
                outcome,
                doc.acts_found.to_string(),
                doc.acts_in_scope.to_string(),
                doc.records_saved.to_string(),
                doc.failures.len().to_string(),
                if doc.marked { "yes" } else { "no" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let summary = if report.failed() > 0 || report.act_failures() > 0 {
            self.warning(&report.summary())
        } else {
            self.success(&report.summary())
        };

        format!("{}\n{}", table, summary)
    }

    /// Format the marker status of a document.
    pub fn format_status(&self, document_id: &str, marker: Option<&ProcessedMarker>) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "document_id": document_id,
                "processed": marker.is_some(),
                "processed_at": marker.map(|m| m.processed_at),
            }))?),
            CliFormat::Table => Ok(match marker {
                Some(marker) => self.success(&format!(
                    "Document {} processed at {} (unix)",
                    document_id, marker.processed_at
                )),
                None => self.info(&format!("Document {} has not been processed", document_id)),
            }),
        }
    }

    /// Format segmented acts.
    pub fn format_acts(&self, acts: &[ActView<'_>]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let values: Vec<serde_json::Value> = acts
                    .iter()
                    .map(|view| {
                        json!({
                            "code": view.act.code.as_str(),
                            "in_scope": view.in_scope,
                            "text": view.act.text,
                            "prompt": view.prompt,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            CliFormat::Table => {
                if acts.is_empty() {
                    return Ok(self.warning("No acts found."));
                }
                let mut out = Vec::with_capacity(acts.len());
                for view in acts {
                    let header = format!(
                        "── {} ({})",
                        view.act.code,
                        if view.in_scope { "contract excerpt" } else { "out of scope" }
                    );
                    let header = if view.in_scope {
                        self.colorize(&header, "green")
                    } else {
                        self.colorize(&header, "yellow")
                    };
                    out.push(format!("{}\n{}", header, view.prompt));
                }
                Ok(out.join("\n\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
