//! Configuration for LLM provider engines

use secrecy::SecretString;
use serde::Deserialize;

/// System prompt used for every reply-generation request
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that writes concise, clear replies.";

/// Configuration for a single provider engine
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, when the provider requires one
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000
}

const fn default_max_tokens() -> u32 {
    300
}

const fn default_temperature() -> f32 {
    0.3
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ProviderConfig {
    /// Preset for the OpenAI chat-completions API
    pub fn openai() -> Self {
        Self::default()
    }

    /// Preset for the Anthropic messages API
    pub fn anthropic() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            ..Self::default()
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
