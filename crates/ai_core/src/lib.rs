//! AI Core - LLM provider engines for reply generation
//!
//! Provides one abstraction over the hosted chat-completion providers
//! (OpenAI-compatible and Anthropic) used to refine reply drafts.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod openai;
pub mod ports;
pub mod provider;

pub use anthropic::AnthropicEngine;
pub use config::ProviderConfig;
pub use error::InferenceError;
pub use openai::OpenAiEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
pub use provider::Provider;
