//! Classification cache configuration.

use std::time::Duration;

use serde::Deserialize;

use super::default_true;

/// Classification cache configuration
///
/// Identical email text always classifies the same, so results are
/// cached keyed by a hash of the classifier input.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Enable the classification cache
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time-to-live for cached classifications in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached entries
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_ttl_secs() -> u64 {
    10 * 60
}

const fn default_max_entries() -> u64 {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// TTL as a `Duration`
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
