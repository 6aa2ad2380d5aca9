//! Relay Port
//!
//! A relay (block engine) accepts an ordered bundle and answers with a
//! bundle ID. Errors here are always local to one endpoint.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single relay endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-2xx response
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Block Engine API error
    #[error("Block Engine error: {message} (code: {code})")]
    ApiError { code: i64, message: String },

    /// Successful response without a bundle ID
    #[error("No bundle ID in response")]
    MissingBundleId,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Network/connection error
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl RelayError {
    /// Check if error came from the transport rather than the relay itself
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            RelayError::HttpError(_) | RelayError::Timeout | RelayError::NetworkError(_)
        )
    }

    /// Check if the relay looked at the bundle and refused it
    pub fn is_rejection(&self) -> bool {
        matches!(self, RelayError::ApiError { .. } | RelayError::MissingBundleId)
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout
        } else if err.is_connect() {
            RelayError::NetworkError(err.to_string())
        } else {
            RelayError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::SerializationError(err.to_string())
    }
}

/// Bundle submission to one relay endpoint
#[async_trait]
pub trait RelayPort: Send + Sync {
    /// Send encoded transactions as one bundle, returning the bundle ID
    async fn send_bundle(&self, endpoint: &str, transactions: &[String]) -> Result<String, RelayError>;
}
