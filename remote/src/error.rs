//! Error types for the remote transport

use thiserror::Error;

/// Errors that can occur while talking to the remote car park service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// HTTP client could not be built
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Service returned an unexpected status
    #[error("Service error (status {status}): {message}")]
    ServiceError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::ResponseParseFailed(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}
