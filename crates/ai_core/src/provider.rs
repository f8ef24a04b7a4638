//! Provider selection
//!
//! Maps the configured provider value onto an engine. Generation is an
//! optional refinement step, so anything unrecognized or unconfigured
//! resolves to `Disabled` rather than an error.

use std::sync::Arc;

use tracing::warn;

use crate::{
    anthropic::AnthropicEngine,
    config::ProviderConfig,
    error::InferenceError,
    openai::OpenAiEngine,
    ports::InferenceEngine,
};

/// Which LLM provider to use for reply generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// OpenAI-compatible chat-completions API
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// No provider, template replies only
    #[default]
    Disabled,
}

impl Provider {
    /// Parse the configured provider value
    ///
    /// Legacy boolean-style values ("1", "true", "yes") mean OpenAI.
    /// Anything unrecognized disables generation.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "openai" | "1" | "true" | "yes" => Self::OpenAi,
            "anthropic" => Self::Anthropic,
            other => {
                if !other.is_empty() && other != "off" && other != "false" && other != "0" {
                    warn!(provider = %other, "Unknown LLM provider value, disabling generation");
                }
                Self::Disabled
            },
        }
    }

    /// Build the engine for this provider
    ///
    /// Returns `None` when generation is disabled, including the case
    /// where the selected provider has no API key configured.
    pub fn build(
        self,
        config: ProviderConfig,
    ) -> Result<Option<Arc<dyn InferenceEngine>>, InferenceError> {
        match self {
            Self::Disabled => Ok(None),
            Self::OpenAi | Self::Anthropic if config.api_key.is_none() => {
                warn!(provider = ?self, "LLM provider selected but no API key configured, disabling generation");
                Ok(None)
            },
            Self::OpenAi => Ok(Some(Arc::new(OpenAiEngine::new(config)?))),
            Self::Anthropic => Ok(Some(Arc::new(AnthropicEngine::new(config)?))),
        }
    }
}
