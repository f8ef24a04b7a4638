//! LLM inference adapter - Implements InferencePort over a provider engine
//!
//! Bridges the application's reply-generation port to whichever hosted
//! provider engine was built from configuration. A NullInference stand-in
//! covers deployments with no provider configured.

use std::sync::Arc;

use ai_core::{InferenceEngine, InferenceError, InferenceRequest};
use application::ports::{InferencePort, InferenceResult};
use application::ApplicationError;
use async_trait::async_trait;
use tracing::instrument;

/// Adapter exposing a provider engine as the application inference port
pub struct LlmInferenceAdapter {
    engine: Arc<dyn InferenceEngine>,
    system_prompt: String,
}

impl std::fmt::Debug for LlmInferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmInferenceAdapter")
            .field("engine", &self.engine.name())
            .field("model", &self.engine.default_model())
            .finish_non_exhaustive()
    }
}

impl LlmInferenceAdapter {
    /// Create a new adapter around a provider engine
    #[must_use]
    pub fn new(engine: Arc<dyn InferenceEngine>, system_prompt: impl Into<String>) -> Self {
        Self {
            engine,
            system_prompt: system_prompt.into(),
        }
    }

    /// Convert provider errors to application errors
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) | InferenceError::ServerError(msg) => {
                ApplicationError::ExternalService(msg)
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("inference timeout after {ms}ms"))
            },
            InferenceError::RequestFailed(msg) | InferenceError::InvalidResponse(msg) => {
                ApplicationError::Inference(msg)
            },
        }
    }
}

#[async_trait]
impl InferencePort for LlmInferenceAdapter {
    #[instrument(skip(self, prompt), fields(engine = self.engine.name()))]
    async fn generate_reply(&self, prompt: &str) -> Result<InferenceResult, ApplicationError> {
        let request = InferenceRequest::with_system(&self.system_prompt, prompt);
        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms: response.latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> &str {
        self.engine.default_model()
    }
}

/// Inference port for deployments without a configured provider
///
/// Every generation attempt fails, which pushes callers onto the
/// template reply path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInference;

impl NullInference {
    /// Create a new disabled inference port
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InferencePort for NullInference {
    async fn generate_reply(&self, _prompt: &str) -> Result<InferenceResult, ApplicationError> {
        Err(ApplicationError::Configuration(
            "reply generation is disabled".to_string(),
        ))
    }

    async fn is_healthy(&self) -> bool {
        false
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn current_model(&self) -> &str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use ai_core::{InferenceResponse, TokenUsage};

    use super::*;

    struct ScriptedEngine {
        result: fn() -> Result<InferenceResponse, InferenceError>,
    }

    #[async_trait]
    impl InferenceEngine for ScriptedEngine {
        async fn generate(
            &self,
            _request: InferenceRequest,
        ) -> Result<InferenceResponse, InferenceError> {
            (self.result)()
        }

        async fn health_check(&self) -> Result<bool, InferenceError> {
            Ok(true)
        }

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn default_model(&self) -> &str {
            "test-model"
        }
    }

    #[tokio::test]
    async fn successful_generation_carries_usage() {
        let engine = Arc::new(ScriptedEngine {
            result: || {
                Ok(InferenceResponse {
                    content: "Thanks, will do.".to_string(),
                    model: "test-model".to_string(),
                    latency_ms: 250,
                    usage: Some(TokenUsage {
                        prompt_tokens: 40,
                        completion_tokens: 10,
                        total_tokens: 50,
                    }),
                })
            },
        });
        let adapter = LlmInferenceAdapter::new(engine, "Be brief.");

        let result = adapter.generate_reply("Write a reply").await.unwrap();
        assert_eq!(result.content, "Thanks, will do.");
        assert_eq!(result.tokens_used, Some(50));
        assert_eq!(result.latency_ms, 250);
    }

    #[tokio::test]
    async fn missing_usage_is_preserved_as_none() {
        let engine = Arc::new(ScriptedEngine {
            result: || {
                Ok(InferenceResponse {
                    content: "ok".to_string(),
                    model: "test-model".to_string(),
                    latency_ms: 10,
                    usage: None,
                })
            },
        });
        let adapter = LlmInferenceAdapter::new(engine, "Be brief.");

        let result = adapter.generate_reply("Write a reply").await.unwrap();
        assert_eq!(result.tokens_used, None);
    }

    #[test]
    fn rate_limit_maps_to_rate_limited() {
        let mapped = LlmInferenceAdapter::map_error(InferenceError::RateLimited);
        assert!(matches!(mapped, ApplicationError::RateLimited));
    }

    #[test]
    fn transport_errors_map_to_external_service() {
        for err in [
            InferenceError::ConnectionFailed("refused".to_string()),
            InferenceError::ServerError("HTTP 500".to_string()),
            InferenceError::Timeout(30000),
        ] {
            let mapped = LlmInferenceAdapter::map_error(err);
            assert!(matches!(mapped, ApplicationError::ExternalService(_)));
        }
    }

    #[test]
    fn parse_failures_map_to_inference() {
        let mapped =
            LlmInferenceAdapter::map_error(InferenceError::InvalidResponse("bad json".to_string()));
        assert!(matches!(mapped, ApplicationError::Inference(_)));
    }

    #[tokio::test]
    async fn adapter_reports_engine_health_and_model() {
        let engine = Arc::new(ScriptedEngine {
            result: || Err(InferenceError::RateLimited),
        });
        let adapter = LlmInferenceAdapter::new(engine, "Be brief.");

        assert!(adapter.is_healthy().await);
        assert!(adapter.is_enabled());
        assert_eq!(adapter.current_model(), "test-model");
    }

    #[tokio::test]
    async fn null_inference_is_disabled() {
        let null = NullInference::new();

        assert!(!null.is_enabled());
        assert!(!null.is_healthy().await);
        assert_eq!(null.current_model(), "none");

        let err = null.generate_reply("anything").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}
