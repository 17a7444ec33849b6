//! Splitting gazette text into acts

use crate::error::ExtractorError;
use gazette_domain::{Act, ActCode};
use regex::Regex;
use tracing::debug;

/// Marker closing every act, capturing its identifier code
pub const ACT_MARKER_PATTERN: &str = r"Código Identificador:\s*([A-Z0-9]{9})";

/// Label written back on the last line of each act
const ACT_MARKER_LABEL: &str = "Código Identificador:";

/// Splits a document body into acts
///
/// Noise lines (page headers and footers) are removed first, then the text is
/// cut at every identifier marker. Each code is paired with the text between
/// the previous marker and its own. Text after the last marker is dropped.
#[derive(Debug, Clone)]
pub struct ActSegmenter {
    marker: Regex,
    noise_markers: Vec<String>,
}

impl ActSegmenter {
    /// Create a segmenter dropping lines that contain any of `noise_markers`
    pub fn new(noise_markers: Vec<String>) -> Result<Self, ExtractorError> {
        Ok(Self {
            marker: Regex::new(ACT_MARKER_PATTERN)?,
            noise_markers,
        })
    }

    /// Remove noise lines, keeping the remaining lines in order
    pub fn filter_noise(&self, text: &str) -> String {
        text.split('\n')
            .filter(|line| !self.noise_markers.iter().any(|m| line.contains(m.as_str())))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Segment the text into acts, in document order
    pub fn segment(&self, text: &str) -> Vec<Act> {
        let filtered = self.filter_noise(text);
        let mut acts = Vec::new();
        let mut segment_start = 0;

        for caps in self.marker.captures_iter(&filtered) {
            let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let segment = filtered[segment_start..whole.start()].trim();
            segment_start = whole.end();

            let Ok(code) = ActCode::parse(code.as_str()) else {
                continue;
            };
            let text = if segment.is_empty() {
                format!("{} {}", ACT_MARKER_LABEL, code)
            } else {
                format!("{}\n{} {}", segment, ACT_MARKER_LABEL, code)
            };
            acts.push(Act::new(text, code));
        }

        debug!("Segmented {} acts from {} chars", acts.len(), text.len());
        acts
    }
}
