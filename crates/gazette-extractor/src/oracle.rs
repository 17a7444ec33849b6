//! Adapter between the pipeline and an `LlmProvider`

use gazette_domain::traits::LlmProvider;
use gazette_domain::ExtractionResult;
use std::fmt::Display;
use tracing::{debug, warn};

/// Send one prompt to the oracle
///
/// Provider errors never escape: they come back as a failure result whose
/// text describes the error. No retry happens here.
pub fn extract<L>(provider: &L, prompt: &str) -> ExtractionResult
where
    L: LlmProvider,
    L::Error: Display,
{
    debug!("Prompt length: {} chars", prompt.len());

    match provider.generate(prompt) {
        Ok(text) => {
            debug!("LLM response length: {} chars", text.len());
            ExtractionResult::success(text)
        }
        Err(e) => {
            warn!("LLM call failed: {}", e);
            ExtractionResult::failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_domain::extraction::{FAILURE_CODE, SUCCESS_CODE};
    use gazette_llm::MockProvider;

    #[test]
    fn test_success_carries_text() {
        let provider = MockProvider::new("{}");
        let result = extract(&provider, "Ato: ...");
        assert!(result.status.is_success());
        assert_eq!(result.status.code(), SUCCESS_CODE);
        assert_eq!(result.text, "{}");
    }

    #[test]
    fn test_provider_error_becomes_failure() {
        let provider = MockProvider::new("{}");
        provider.push_error("connection refused");

        let result = extract(&provider, "Ato: ...");

        assert_eq!(result.status.code(), FAILURE_CODE);
        assert!(result.text.contains("connection refused"));
    }
}
