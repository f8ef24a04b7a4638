//! Zero-shot classifier configuration.

use integration_classifier::ClassifierConfig;
use secrecy::SecretString;
use serde::Deserialize;

use super::default_true;

/// Classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    /// Inference endpoint of the hosted zero-shot model
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token for the inference endpoint
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fall back to the offline keyword classifier when the hosted
    /// model is unreachable
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
            fallback_enabled: true,
        }
    }
}

impl ClassifierSettings {
    /// Convert to the integration crate's client configuration
    #[must_use]
    pub fn to_client_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            endpoint: self.endpoint.clone(),
            api_token: self.api_token.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
