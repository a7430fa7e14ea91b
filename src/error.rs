//! Error Types
//!
//! Errors raised by the cloud API layer and the request dispatcher.

use thiserror::Error;

/// Failure of a single remote call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Outcome of handing a request to the dispatcher
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SendError {
    /// Another operation on the same id has not resolved yet
    #[error("an operation on {0} is already in progress")]
    Busy(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ApiResult<T> = Result<T, ApiError>;
