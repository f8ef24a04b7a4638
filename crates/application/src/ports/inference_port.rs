//! Inference port for LLM reply generation

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Result of an inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated text
    pub content: String,
    /// Model that produced it
    pub model: String,
    /// Tokens consumed, when the provider reports them
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Port for LLM text generation
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a reply body from the given prompt
    async fn generate_reply(&self, prompt: &str) -> Result<InferenceResult, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_healthy(&self) -> bool;

    /// Whether generation is configured at all
    ///
    /// When false, callers skip the provider and use template replies.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Currently configured model
    fn current_model(&self) -> &str;
}
