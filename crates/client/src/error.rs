//! Error taxonomy of the remote access layer.

use thiserror::Error;

use toolscout_core::DomainError;

/// Failure of a call to the directory API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, refused connection, reset, timeout).
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The API answered with a status outside the success range.
    #[error("API error ({status}): {body}")]
    NonSuccessStatus { status: u16, body: String },

    /// Detail fetch for an id the API does not know.
    #[error("product not found: {0}")]
    NotFound(String),

    /// Bad credentials or a registration conflict.
    #[error("authentication failed ({status}): {message}")]
    AuthFailure { status: u16, message: String },

    /// The response body did not decode into the expected records.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl ClientError {
    /// Whether the degraded (sample data) path may stand in for this failure
    /// on operations that otherwise surface errors.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::NetworkUnavailable(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::NetworkUnavailable(err.to_string())
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        ClientError::MalformedPayload(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedPayload(err.to_string())
    }
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid value {value:?} for {var}: expected a non-negative integer")]
    InvalidNumber { var: &'static str, value: String },
}
