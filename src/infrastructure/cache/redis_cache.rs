//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis cache shared between frontend processes.
///
/// Values are stored as JSON under a namespaced key with a millisecond TTL.
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every key (e.g., `"cms:"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        build_key(&self.key_prefix, key)
    }
}

fn build_key(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, key)
}

/// Redis rejects a zero expiry, so sub-millisecond TTLs are rounded up.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl<V> CacheService<V> for RedisCache
where
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn has(&self, key: &str) -> bool {
        let key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.exists::<_, bool>(&key).await {
            Ok(exists) => exists,
            Err(e) => {
                error!("Redis EXISTS error for {}: {}", key, e);
                false
            }
        }
    }

    async fn get(&self, key: &str) -> CacheResult<Option<V>> {
        let key = self.build_key(key);
        let mut conn = self.client.clone();

        let raw = match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                return Ok(None);
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                return Ok(None);
            }
        };

        match serde_json::from_str::<V>(&raw) {
            Ok(value) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            Err(e) => {
                // Stale layout from an older release; treat as a miss.
                warn!("Redis value for {} could not be decoded: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) -> CacheResult<()> {
        let key = self.build_key(key);
        let payload = serde_json::to_string(&value)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;
        let mut conn = self.client.clone();
        let millis = ttl_millis(ttl);

        match conn.pset_ex::<_, _, ()>(&key, payload, millis).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}ms)", key, millis);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
