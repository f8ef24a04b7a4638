//! Port adapters

pub mod cached_classifier;
pub mod classifier_adapter;
pub mod fallback_classifier;
pub mod keyword_classifier;
pub mod llm_inference_adapter;

pub use cached_classifier::CachedClassifier;
pub use classifier_adapter::ZeroShotClassifierAdapter;
pub use fallback_classifier::FallbackClassifier;
pub use keyword_classifier::KeywordClassifier;
pub use llm_inference_adapter::{LlmInferenceAdapter, NullInference};
