//! Segment command implementation.

use crate::cli::SegmentArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{ActView, Formatter};
use gazette_domain::Document;
use gazette_extractor::{ActClassifier, ActSegmenter, PromptBuilder};
use std::fs;

/// Execute the segment command.
///
/// Works offline on a local file; nothing is sent to the assistant and nothing
/// is written to the store.
pub fn execute_segment(args: SegmentArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    let id = args
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let document = Document::new(id, text);

    let segmenter = ActSegmenter::new(config.extractor.noise_markers.clone())?;
    let classifier = ActClassifier::new(
        &config.extractor.excerpt_token,
        &config.extractor.contract_token,
    );

    let acts = segmenter.segment(&document.text);
    let views: Vec<ActView<'_>> = acts
        .iter()
        .map(|act| ActView {
            act,
            in_scope: classifier.is_in_scope(&act.text),
            prompt: PromptBuilder::new(act, &document).build(),
        })
        .filter(|view| view.in_scope || !args.in_scope)
        .collect();

    println!("{}", formatter.format_acts(&views)?);
    Ok(())
}
