//! HTTP client for the generative messages API.
//!
//! One POST per prompt: a JSON envelope goes out, a text block comes back.
//! No retries and no streaming; every failure mode surfaces as a
//! [`TransportError`] so the orchestration core can treat the backend as a
//! single fallible call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wayfarer_core::error::TransportError;
use wayfarer_core::generative::{GenerationRequest, GenerativeClient};

/// Default messages API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default per-request deadline. Generation is slow; sixty seconds covers
/// a long narrative reply without hanging a stuck journey forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Version tag the messages endpoint requires on every request.
const API_VERSION: &str = "2023-06-01";

/// How much of an error body is kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

/// Configuration for a [`MessagesApiClient`].
#[derive(Debug, Clone)]
pub struct GenerativeConfig {
    /// Base URL of the messages API, without a trailing slash.
    pub base_url: String,
    /// Credential sent as the `x-api-key` header.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Deadline for one complete request.
    pub timeout: Duration,
}

impl GenerativeConfig {
    /// Configuration with defaults for everything but the credential.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Production [`GenerativeClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct MessagesApiClient {
    http: Client,
    config: GenerativeConfig,
}

impl MessagesApiClient {
    /// Builds a client with the request deadline baked into the HTTP pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(mut config: GenerativeConfig) -> Result<Self, TransportError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("building HTTP client: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl GenerativeClient for MessagesApiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TransportError> {
        let body = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![WireMessage {
                role: "user",
                content: request.prompt,
            }],
        };
        debug!(
            model = %self.config.model,
            max_tokens = request.max_tokens,
            "issuing generation request"
        );

        let response = self
            .http
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(&e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: clip(&body),
            });
        }

        let envelope: MessagesResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.config.timeout)
            } else {
                TransportError::Decode(e.to_string())
            }
        })?;
        text_payload(envelope)
    }
}

/// Request envelope for the messages endpoint.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// Response envelope for the messages endpoint. Everything but the text
/// content is ignored.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Pulls the text out of the first content block.
fn text_payload(envelope: MessagesResponse) -> Result<String, TransportError> {
    envelope
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| TransportError::Decode("response contained no text block".into()))
}

fn classify_send_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Network(error.to_string())
    }
}

/// Clips an error body down to log size.
fn clip(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
