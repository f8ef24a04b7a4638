//! Reply generation provider configuration.

use std::sync::Arc;

use ai_core::{InferenceEngine, InferenceError, Provider, ProviderConfig};
use secrecy::SecretString;
use serde::Deserialize;

/// Reply generation configuration
///
/// Generation is an optional refinement step. With an empty or
/// unrecognized `provider` value the assistant serves template
/// replies only.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Provider selection: "openai", "anthropic", or empty to disable.
    /// Legacy boolean-style values ("1", "true", "yes") mean OpenAI.
    #[serde(default)]
    pub provider: String,

    /// API key for the selected provider
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Model override (defaults to the provider preset)
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL override (defaults to the provider preset)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Maximum tokens to generate per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

const fn default_max_tokens() -> u32 {
    300
}

const fn default_temperature() -> f32 {
    0.3
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: String::new(),
            api_key: None,
            model: None,
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmSettings {
    /// Parse the configured provider selection
    #[must_use]
    pub fn provider(&self) -> Provider {
        Provider::parse(&self.provider)
    }

    /// Build the provider config from these settings
    #[must_use]
    pub fn to_provider_config(&self) -> ProviderConfig {
        let mut config = match self.provider() {
            Provider::Anthropic => ProviderConfig::anthropic(),
            Provider::OpenAi | Provider::Disabled => ProviderConfig::openai(),
        };
        config.api_key = self.api_key.clone();
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        config.max_tokens = self.max_tokens;
        config.temperature = self.temperature;
        config
    }

    /// Build the inference engine for these settings
    ///
    /// Returns `None` when generation is disabled or no API key is
    /// configured for the selected provider.
    pub fn build_engine(&self) -> Result<Option<Arc<dyn InferenceEngine>>, InferenceError> {
        self.provider().build(self.to_provider_config())
    }
}
