//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Message has neither subject nor body content
    #[error("Email message is empty: subject and body are both blank")]
    EmptyMessage,

    /// Unknown urgency label
    #[error("Invalid urgency label: {0}")]
    InvalidUrgency(String),

    /// Unknown reply tone
    #[error("Invalid tone: {0}")]
    InvalidTone(String),

    /// Classification score outside the valid range
    #[error("Invalid score for {label}: {value} is not in 0.0..=1.0")]
    InvalidScore { label: String, value: f64 },

    /// Sender field could not be parsed
    #[error("Invalid sender: {0}")]
    InvalidSender(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid score error
    pub fn invalid_score(label: impl Into<String>, value: f64) -> Self {
        Self::InvalidScore {
            label: label.into(),
            value,
        }
    }
}
