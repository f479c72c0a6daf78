//! API error types and their HTTP mappings.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use wayfarer_core::error::TravelError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid, or a
    /// collaborator could not be constructed from the configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `TravelError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub TravelError);

impl From<TravelError> for ApiError {
    fn from(err: TravelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            TravelError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            TravelError::Busy => (StatusCode::CONFLICT, "busy"),
            TravelError::NotActive => (StatusCode::CONFLICT, "journey_not_active"),
            TravelError::AlreadyActive => (StatusCode::CONFLICT, "journey_already_active"),
            TravelError::Superseded => (StatusCode::CONFLICT, "superseded"),
            TravelError::Transport(_) => (StatusCode::BAD_GATEWAY, "backend_unreachable"),
            TravelError::MalformedResponse(_) => {
                (StatusCode::BAD_GATEWAY, "backend_malformed_response")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
