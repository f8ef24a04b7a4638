//! Inference errors

use thiserror::Error;

/// Errors that can occur while talking to an LLM provider
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during generation
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Provider returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout(30000)
        } else if err.is_connect() {
            InferenceError::ConnectionFailed(err.to_string())
        } else {
            InferenceError::RequestFailed(err.to_string())
        }
    }
}
