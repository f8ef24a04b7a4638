//! Fallback composition over two classifier ports
//!
//! Routes classification to a primary backend and falls back to a
//! secondary one when the primary fails for reasons the secondary can
//! compensate for. Keeps triage alive through endpoint outages.

use std::sync::Arc;

use application::ports::{ClassificationError, ClassifierPort};
use async_trait::async_trait;
use domain::UrgencyScores;
use tracing::{instrument, warn};

/// Classifier that degrades to a secondary backend on failure
pub struct FallbackClassifier {
    primary: Arc<dyn ClassifierPort>,
    fallback: Arc<dyn ClassifierPort>,
}

impl std::fmt::Debug for FallbackClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackClassifier")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl FallbackClassifier {
    /// Create a new fallback composition
    #[must_use]
    pub fn new(primary: Arc<dyn ClassifierPort>, fallback: Arc<dyn ClassifierPort>) -> Self {
        Self { primary, fallback }
    }

    /// Whether an error from the primary warrants the fallback path
    ///
    /// Empty input would fail on any backend, so it propagates.
    const fn should_fall_back(error: &ClassificationError) -> bool {
        !matches!(error, ClassificationError::EmptyInput)
    }
}

#[async_trait]
impl ClassifierPort for FallbackClassifier {
    #[instrument(skip(self, text), fields(primary = self.primary.name()))]
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassificationError> {
        match self.primary.classify(text).await {
            Ok(scores) => Ok(scores),
            Err(e) if Self::should_fall_back(&e) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "Primary classifier failed, using fallback"
                );
                self.fallback.classify(text).await
            },
            Err(e) => Err(e),
        }
    }

    async fn is_healthy(&self) -> bool {
        self.primary.is_healthy().await
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}
