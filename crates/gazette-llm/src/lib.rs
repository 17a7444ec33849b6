//! Gazette LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `gazette-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `AssistantProvider`: Hosted assistant API (thread, run, poll, read reply)
//!
//! # Examples
//!
//! ```
//! use gazette_llm::MockProvider;
//! use gazette_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"codigo_identificador": "ABC123XYZ"}"#);
//! let reply = provider.generate("Ato: ...").unwrap();
//! assert!(reply.contains("ABC123XYZ"));
//! ```

#![warn(missing_docs)]

pub mod assistant;

use gazette_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use assistant::{AssistantConfig, AssistantProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The run ended in a non-successful terminal state
    #[error("Run {status}: {message}")]
    RunFailed {
        /// Terminal status reported by the API
        status: String,
        /// Error message reported by the API, if any
        message: String,
    },

    /// The run did not finish before the deadline
    #[error("Run timed out after {0} seconds")]
    Timeout(u64),

    /// Provider configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(reason) => Err(LlmError::Other(reason)),
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// Replies are resolved in this order:
/// 1. the next queued reply (see [`MockProvider::push_response`]),
/// 2. the first keyed reply whose key occurs in the prompt,
/// 3. the default reply.
///
/// Clones share state, so a clone handed to the pipeline can still be
/// inspected by the test.
///
/// # Examples
///
/// ```
/// use gazette_llm::MockProvider;
/// use gazette_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("ABC123XYZ", "first");
/// provider.add_error("ZZZ999ZZZ");
///
/// assert_eq!(provider.generate("Código: ABC123XYZ").unwrap(), "first");
/// assert!(provider.generate("Código: ZZZ999ZZZ").is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    keyed: Arc<Mutex<Vec<(String, MockReply)>>>,
    queue: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            keyed: Arc::new(Mutex::new(Vec::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` whenever the prompt contains `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        lock(&self.keyed).push((key.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the prompt contains `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        lock(&self.keyed).push((key.into(), MockReply::Error("Mock error".to_string())));
    }

    /// Queue a reply for the next call, regardless of the prompt
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.queue).push_back(MockReply::Text(response.into()));
    }

    /// Queue a failure for the next call, regardless of the prompt
    pub fn push_error(&self, reason: impl Into<String>) {
        lock(&self.queue).push_back(MockReply::Error(reason.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());

        if let Some(reply) = lock(&self.queue).pop_front() {
            return reply.into_result();
        }

        let keyed = lock(&self.keyed);
        if let Some((_, reply)) = keyed.iter().find(|(key, _)| prompt.contains(key.as_str())) {
            return reply.clone().into_result();
        }

        Ok(self.default_response.clone())
    }
}
