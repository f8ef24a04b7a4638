//! Application configuration
//!
//! Split into focused sub-modules by concern:
//! - `server`: HTTP server settings
//! - `classifier`: hosted zero-shot classifier and keyword fallback
//! - `llm`: reply generation provider
//! - `reply`: envelope signature and default tone
//! - `cache`: classification cache settings

mod cache;
mod classifier;
mod llm;
mod reply;
mod server;

use serde::Deserialize;

use crate::retry::RetryConfig;

pub use cache::CacheConfig;
pub use classifier::ClassifierSettings;
pub use llm::LlmSettings;
pub use reply::ReplyConfig;
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Classifier configuration
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Reply generation configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Reply envelope configuration
    #[serde(default)]
    pub reply: ReplyConfig,

    /// Classification cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Retry configuration for external service calls
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., MAILTRIAGE_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("MAILTRIAGE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
