//! Infrastructure layer
//!
//! Adapters that connect the application ports to the outside world:
//! configuration loading, the hosted zero-shot classifier, the keyword
//! fallback, LLM reply generation, and the canned reply templates.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod templates;

pub use adapters::{
    CachedClassifier, FallbackClassifier, KeywordClassifier, LlmInferenceAdapter, NullInference,
    ZeroShotClassifierAdapter,
};
pub use config::AppConfig;
pub use retry::{RetryConfig, Retryable, retry};
pub use templates::TemplateEngine;
