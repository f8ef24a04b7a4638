//! Zero-shot classifier adapter - Implements ClassifierPort using the
//! hosted inference client

use application::ports::{ClassificationError, ClassifierPort};
use async_trait::async_trait;
use domain::UrgencyScores;
use integration_classifier::{ClassifierError, UrgencyClassifier, ZeroShotClient};
use tracing::instrument;

use crate::retry::{RetryConfig, retry};

/// Adapter for the hosted zero-shot classification model
///
/// Wraps the HTTP client with retry-on-transient-failure semantics.
#[derive(Debug)]
pub struct ZeroShotClassifierAdapter {
    client: ZeroShotClient,
    retry: RetryConfig,
}

impl ZeroShotClassifierAdapter {
    /// Create a new adapter around a configured client
    #[must_use]
    pub fn new(client: ZeroShotClient) -> Self {
        Self {
            client,
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry configuration
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Convert integration errors to port errors
    fn map_error(e: ClassifierError) -> ClassificationError {
        match e {
            ClassifierError::EmptyInput => ClassificationError::EmptyInput,
            ClassifierError::RateLimitExceeded => ClassificationError::RateLimited,
            ClassifierError::ParseError(msg) => ClassificationError::InvalidResponse(msg),
            ClassifierError::EmptyScores => {
                ClassificationError::InvalidResponse(ClassifierError::EmptyScores.to_string())
            },
            ClassifierError::ConnectionFailed(msg)
            | ClassifierError::RequestFailed(msg)
            | ClassifierError::ServiceUnavailable(msg) => {
                ClassificationError::ServiceUnavailable(msg)
            },
        }
    }
}

#[async_trait]
impl ClassifierPort for ZeroShotClassifierAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassificationError> {
        retry(&self.retry, || self.client.classify(text))
            .await
            .map_err(Self::map_error)
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }

    fn name(&self) -> &'static str {
        "zero-shot"
    }
}
