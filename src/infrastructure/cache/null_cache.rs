//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when caching is disabled via `CACHE_ENABLED=false`: every lookup is
/// a miss, so every request reads straight from the Store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> CacheService<V> for NullCache
where
    V: Send + Sync + 'static,
{
    async fn has(&self, _key: &str) -> bool {
        false
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<V>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: V, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
