//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
    SerializationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
            Self::SerializationError(e) => write!(f, "Cache serialization error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Generic TTL key/value cache.
///
/// The cache knows nothing about what it stores: `V` is chosen by the caller,
/// and a value that itself represents "nothing found" is a legitimate cached
/// entry. Callers distinguish "not cached" (`Ok(None)` / `has == false`) from
/// "cached as empty" by the returned value, never by its zero-ness.
///
/// Implementations must be safe for concurrent use without external locking.
/// There is no eviction policy beyond TTL expiry; entries are replaced
/// wholesale by `set`.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process sharded map
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed, JSON encoded
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService<V>: Send + Sync
where
    V: Send + Sync + 'static,
{
    /// Returns true if a live (non-expired) entry exists for `key`.
    async fn has(&self, key: &str) -> bool;

    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or expired entry
    ///
    /// # Errors
    ///
    /// Production implementations log backend errors and report a miss
    /// instead (fail-open).
    async fn get(&self, key: &str) -> CacheResult<Option<V>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers; a failed write only costs a
    /// later Store round-trip.
    async fn set(&self, key: &str, value: V, ttl: Duration) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
