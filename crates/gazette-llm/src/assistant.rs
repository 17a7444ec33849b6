//! Hosted Assistant Provider Implementation
//!
//! Talks to an Assistants-style REST API (OpenAI `v2` wire format). One call
//! to [`AssistantProvider::generate`] is a full conversation round trip:
//!
//! 1. `POST /threads` with the prompt as the single user message
//! 2. `POST /threads/{thread}/runs` with the configured assistant id
//! 3. `GET /threads/{thread}/runs/{run}` until the run reaches a terminal status
//! 4. `GET /threads/{thread}/messages?run_id={run}` and read the first text reply
//!
//! The provider is blocking. Each HTTP request is bounded by
//! `request_timeout_secs` and the polling loop by `run_timeout_secs`.
//!
//! # Examples
//!
//! ```no_run
//! use gazette_llm::{AssistantConfig, AssistantProvider};
//! use gazette_domain::traits::LlmProvider;
//!
//! let config = AssistantConfig {
//!     api_key: "sk-...".to_string(),
//!     assistant_id: "asst_...".to_string(),
//!     ..AssistantConfig::default()
//! };
//! let provider = AssistantProvider::new(config).unwrap();
//! let reply = provider.generate("Ato: ...").unwrap();
//! ```

use crate::LlmError;
use gazette_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default assistant API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for a single HTTP request (60 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default deadline for a run to reach a terminal status (5 minutes)
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 300;

/// Default delay between run status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Configuration for [`AssistantProvider`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// API base URL, without trailing slash
    pub base_url: String,

    /// Bearer token
    pub api_key: String,

    /// Assistant that answers the prompts
    pub assistant_id: String,

    /// Timeout for each HTTP request (seconds)
    pub request_timeout_secs: u64,

    /// Deadline for a run to finish (seconds)
    pub run_timeout_secs: u64,

    /// Delay between run status polls (milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            assistant_id: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            run_timeout_secs: DEFAULT_RUN_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl AssistantConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the run deadline as a Duration
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("assistant base_url must not be empty".to_string());
        }
        if self.api_key.trim().is_empty() {
            return Err("assistant api_key must not be empty".to_string());
        }
        if self.assistant_id.trim().is_empty() {
            return Err("assistant assistant_id must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.run_timeout_secs == 0 {
            return Err("run_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Request body for thread creation
#[derive(Serialize)]
struct CreateThreadRequest<'a> {
    messages: [ThreadMessage<'a>; 1],
}

#[derive(Serialize)]
struct ThreadMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body for run creation
#[derive(Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Deserialize)]
struct Thread {
    id: String,
}

#[derive(Deserialize)]
struct Run {
    id: String,
    status: String,
    #[serde(default)]
    last_error: Option<RunError>,
}

#[derive(Deserialize)]
struct RunError {
    #[serde(default)]
    message: String,
}

impl Run {
    fn is_terminal(&self) -> bool {
        matches!(
            self.status.as_str(),
            "completed" | "failed" | "cancelled" | "expired" | "incomplete" | "requires_action"
        )
    }
}

#[derive(Deserialize)]
struct MessageList {
    data: Vec<Message>,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Vec<MessageContent>,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<MessageText>,
}

#[derive(Deserialize)]
struct MessageText {
    value: String,
}

/// Assistant API provider
pub struct AssistantProvider {
    config: AssistantConfig,
    client: Client,
}

impl AssistantProvider {
    /// Create a provider from validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] when the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: AssistantConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Assistant id this provider submits runs to
    pub fn assistant_id(&self) -> &str {
        &self.config.assistant_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send an authenticated request and decode the JSON body
    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, LlmError> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .header("OpenAI-Beta", "assistants=v2")
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<T>()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    fn create_thread(&self, prompt: &str) -> Result<Thread, LlmError> {
        let body = CreateThreadRequest {
            messages: [ThreadMessage {
                role: "user",
                content: prompt,
            }],
        };
        self.send(self.client.post(self.url("threads")).json(&body))
    }

    fn create_run(&self, thread_id: &str) -> Result<Run, LlmError> {
        let body = CreateRunRequest {
            assistant_id: &self.config.assistant_id,
        };
        let path = format!("threads/{}/runs", thread_id);
        self.send(self.client.post(self.url(&path)).json(&body))
    }

    fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run, LlmError> {
        let path = format!("threads/{}/runs/{}", thread_id, run_id);
        self.send(self.client.get(self.url(&path)))
    }

    /// Ask the API to stop a run we gave up on; failures are only logged
    fn cancel_run(&self, thread_id: &str, run_id: &str) {
        let path = format!("threads/{}/runs/{}/cancel", thread_id, run_id);
        if let Err(e) = self.send::<Run>(self.client.post(self.url(&path))) {
            warn!(thread_id, run_id, "Failed to cancel timed-out run: {}", e);
        }
    }

    /// Poll until the run reaches a terminal status or the deadline passes
    fn wait_for_run(&self, thread_id: &str, mut run: Run) -> Result<Run, LlmError> {
        let deadline = Instant::now() + self.config.run_timeout();

        while !run.is_terminal() {
            if Instant::now() >= deadline {
                self.cancel_run(thread_id, &run.id);
                return Err(LlmError::Timeout(self.config.run_timeout_secs));
            }
            std::thread::sleep(self.config.poll_interval());
            run = self.get_run(thread_id, &run.id)?;
            debug!(thread_id, run_id = %run.id, status = %run.status, "Polled run");
        }

        Ok(run)
    }

    fn first_reply(&self, thread_id: &str, run_id: &str) -> Result<String, LlmError> {
        let path = format!("threads/{}/messages", thread_id);
        let messages: MessageList = self.send(
            self.client
                .get(self.url(&path))
                .query(&[("run_id", run_id)]),
        )?;

        messages
            .data
            .into_iter()
            .next()
            .and_then(|message| {
                message
                    .content
                    .into_iter()
                    .find(|part| part.kind == "text")
                    .and_then(|part| part.text)
            })
            .map(|text| text.value)
            .ok_or_else(|| LlmError::InvalidResponse("Run produced no text reply".to_string()))
    }
}

impl LlmProviderTrait for AssistantProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let thread = self.create_thread(prompt)?;
        let run = self.create_run(&thread.id)?;
        debug!(thread_id = %thread.id, run_id = %run.id, "Created assistant run");

        let run = self.wait_for_run(&thread.id, run)?;
        if run.status != "completed" {
            return Err(LlmError::RunFailed {
                status: run.status,
                message: run
                    .last_error
                    .map(|e| e.message)
                    .unwrap_or_default(),
            });
        }

        self.first_reply(&thread.id, &run.id)
    }
}
