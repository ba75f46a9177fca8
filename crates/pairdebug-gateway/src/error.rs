//! Gateway error types and their HTTP representation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pairdebug_providers::ProviderError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Completion provider error.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body claimed to be JSON but could not be read.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// JSON body returned for failed requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Human-readable summary.
    pub error: String,

    /// Upstream payload or local error detail.
    pub details: serde_json::Value,
}

impl ErrorBody {
    fn new(error: impl Into<String>, details: impl Into<serde_json::Value>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

impl GatewayError {
    /// HTTP status and body for this error.
    pub fn to_http(&self) -> (StatusCode, ErrorBody) {
        match self {
            Self::Provider(ProviderError::Upstream { status, body }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorBody::new("Error from AI service", body.clone()),
            ),
            Self::Provider(ProviderError::Unavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody::new(
                    "No response from AI service. Please try again later.",
                    "Request timeout or network issue",
                ),
            ),
            Self::InvalidBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Invalid request body", message.as_str()),
            ),
            Self::Provider(ProviderError::Dispatch(message))
            | Self::Provider(ProviderError::Config(message)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to process your request", message.as_str()),
            ),
            Self::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to process your request", e.to_string()),
            ),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_http();
        (status, Json(body)).into_response()
    }
}
