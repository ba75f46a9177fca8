//! Error types for completion providers.

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Provider error types.
///
/// The first three variants are the request-path taxonomy: the gateway maps
/// each to a distinct HTTP status. `Config` only occurs while building a
/// provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The completion service answered with a non-2xx status.
    #[error("Upstream error: {status}")]
    Upstream {
        status: u16,
        /// Response body, parsed as JSON when possible.
        body: serde_json::Value,
    },

    /// No response was received (connect failure, timeout, dropped body).
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    /// The request could not be constructed or dispatched.
    #[error("Failed to dispatch request: {0}")]
    Dispatch(String),

    /// Invalid provider configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Create an upstream error.
    pub fn upstream(status: u16, body: serde_json::Value) -> Self {
        Self::Upstream { status, body }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a dispatch error.
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<reqwest::Error> for ProviderError {
    /// Classify a transport error raised before any response arrived.
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Self::Dispatch(e.to_string())
        } else {
            Self::Unavailable(e.to_string())
        }
    }
}
