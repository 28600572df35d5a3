//! Caching layer fronting every Store read.
//!
//! Provides a generic [`CacheService`] trait with three implementations:
//! - [`MemoryCache`] - In-process concurrent map with lazy TTL expiry
//! - [`RedisCache`] - Shared Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
