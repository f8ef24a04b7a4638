//! Classifier port for urgency scoring

use async_trait::async_trait;
use domain::UrgencyScores;
use thiserror::Error;

/// Errors from the classification backend
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// Service is unreachable or temporarily down
    #[error("Classification service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Classification rate limit exceeded")]
    RateLimited,

    /// Backend returned something the adapter could not use
    #[error("Invalid classification response: {0}")]
    InvalidResponse(String),

    /// Nothing to classify
    #[error("No text to classify")]
    EmptyInput,
}

/// Port for scoring email text against the urgency labels
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    /// Score the given text, returning per-label confidences
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassificationError>;

    /// Check if the backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Name of the backend, for logging and readiness reporting
    fn name(&self) -> &'static str;
}
