//! Error taxonomy for journey orchestration.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by journey operations.
#[derive(Debug, Error)]
pub enum TravelError {
    /// The character profile or user input is incomplete or unusable.
    /// Detected before any backend call is issued.
    #[error("validation error: {0}")]
    Validation(String),

    /// The generative backend could not produce a text reply.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend replied with text the journey cannot use: not the
    /// expected structure, missing fields, or an unusable delay.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// Another update is already in flight. Nothing was issued; retry
    /// once the in-flight update settles.
    #[error("an update is already in flight")]
    Busy,

    /// The operation requires an active journey and none exists.
    #[error("no journey is active")]
    NotActive,

    /// A journey is already active. Reset before starting another.
    #[error("a journey is already active")]
    AlreadyActive,

    /// The journey was reset while this update was in flight, so its
    /// result was discarded without touching state.
    #[error("update superseded by a reset")]
    Superseded,
}

/// Transport-level failure talking to the generative backend.
///
/// Distinct from [`TravelError::MalformedResponse`]: a transport error
/// means no usable text payload ever reached the response parser.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// The request failed below HTTP: DNS, connect, or TLS.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured deadline.
    #[error("backend call timed out after {0:?}")]
    Timeout(Duration),

    /// The response arrived but its envelope could not be decoded into a
    /// text payload.
    #[error("undecodable backend payload: {0}")]
    Decode(String),
}
