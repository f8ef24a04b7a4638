//! Caching decorator for classifier ports
//!
//! Identical classifier input always yields the same scores, so
//! results are cached in-memory keyed by a blake3 hash of the text.
//! Errors are never cached.

use std::{
    sync::Arc,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use application::ports::{ClassificationError, ClassifierPort};
use async_trait::async_trait;
use domain::UrgencyScores;
use moka::future::Cache;
use tracing::{debug, instrument};

/// Classifier decorator with an in-memory result cache
pub struct CachedClassifier {
    inner: Arc<dyn ClassifierPort>,
    cache: Cache<String, UrgencyScores>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for CachedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedClassifier")
            .field("inner", &self.inner.name())
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl CachedClassifier {
    /// Wrap a classifier with a cache of the given TTL and capacity
    #[must_use]
    pub fn new(inner: Arc<dyn ClassifierPort>, ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn cache_key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }
}

#[async_trait]
impl ClassifierPort for CachedClassifier {
    #[instrument(skip(self, text), fields(inner = self.inner.name()))]
    async fn classify(&self, text: &str) -> Result<UrgencyScores, ClassificationError> {
        let key = Self::cache_key(text);

        if let Some(scores) = self.cache.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Classification cache hit");
            return Ok(scores);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let scores = self.inner.classify(text).await?;
        self.cache.insert(key, scores).await;
        Ok(scores)
    }

    async fn is_healthy(&self) -> bool {
        self.inner.is_healthy().await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
