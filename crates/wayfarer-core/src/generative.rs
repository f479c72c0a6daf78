//! Outbound port for the generative text backend.

use async_trait::async_trait;

use crate::error::TransportError;

/// A single prompt for the backend, with a response length target.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Full instruction text for the backend.
    pub prompt: String,
    /// Upper bound on the generated reply, in tokens.
    pub max_tokens: u32,
}

/// Port for the generative text backend.
///
/// One request, one raw text reply. No streaming, no retries: a call
/// either yields text or fails with a [`TransportError`]. Judging the
/// content of the text is the response parser's job, not the client's.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Sends `request` and returns the backend's raw text reply.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on a non-success status, a network
    /// failure, a timeout, or an undecodable response envelope.
    async fn generate(&self, request: GenerationRequest) -> Result<String, TransportError>;
}
