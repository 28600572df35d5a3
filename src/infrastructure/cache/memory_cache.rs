//! In-process TTL cache backed by a sharded concurrent map.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// In-memory cache with per-entry TTL.
///
/// Entries expire lazily: an expired entry is dropped by the read that finds
/// it. [`MemoryCache::spawn_sweeper`] additionally purges expired entries in
/// the background so keys that are never read again do not pile up.
///
/// Uses `tokio::time::Instant`, so expiry follows the tokio clock and can be
/// driven deterministically in tests with a paused runtime.
pub struct MemoryCache<V> {
    entries: DashMap<String, Entry<V>>,
}

impl<V> MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    /// Spawns a task purging expired entries every `interval`.
    ///
    /// The task holds a weak reference and stops once the cache is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let Some(cache) = weak.upgrade() else {
                    break;
                };

                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!(purged, remaining = cache.len(), "Cache sweep");
                }
            }
        })
    }

    fn live_value(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // Expired: the read guard above is released before removal.
        self.entries
            .remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }
}

impl<V> Default for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> CacheService<V> for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn has(&self, key: &str) -> bool {
        self.live_value(key).is_some()
    }

    async fn get(&self, key: &str) -> CacheResult<Option<V>> {
        Ok(self.live_value(key))
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) -> CacheResult<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
