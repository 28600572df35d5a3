//! Typed cache payloads and the read-through helper shared by the services.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::services::alias_pattern::AliasPattern;
use crate::domain::entities::{Page, Site, Template, Translation};
use crate::infrastructure::cache::CacheService;

/// Long TTL applied to successful and legitimately empty lookups.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Short TTL applied when the Store failed, so a transient fault self-heals.
pub const DEFAULT_ERROR_TTL: Duration = Duration::from_secs(10);

/// A site together with the endpoint that matched the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteEndpoint {
    pub site: Site,
    pub endpoint: String,
}

/// Everything the frontend stores in the cache.
///
/// The `Option` payloads make cached negatives explicit: `Page(None)` means
/// "looked up, nothing there", while a cache miss is no value at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CacheValue {
    Sites(Vec<Site>),
    SiteEndpoint(Option<SiteEndpoint>),
    Page(Option<Page>),
    AliasPatterns(Vec<AliasPattern>),
    BlockContent(String),
    Template(Option<Template>),
    Translation(Option<Translation>),
}

/// Cache backend type used by the frontend.
pub type FrontendCache = dyn CacheService<CacheValue>;

/// Cache key builders. Keys are plain strings so every backend can store them.
pub mod keys {
    pub const SITES_ACTIVE: &str = "sites_active";

    pub fn site_endpoint(domain: &str, path: &str) -> String {
        format!("find_site_and_endpoint:{}{}", domain, path)
    }

    pub fn page_by_alias(site_id: &str, alias: &str) -> String {
        format!("page_site:{}:alias:{}", site_id, alias)
    }

    pub fn page_by_id(page_id: &str) -> String {
        format!("page_id:{}", page_id)
    }

    pub fn alias_patterns(site_id: &str) -> String {
        format!("page_alias_patterns_site:{}", site_id)
    }

    pub fn block_content(block_id: &str) -> String {
        format!("block_content_{}", block_id)
    }

    pub fn template(template_id: &str) -> String {
        format!("template_{}", template_id)
    }

    pub fn translation(key: &str) -> String {
        format!("translation_{}", key)
    }
}

/// TTL classes applied by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    pub error_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            error_ttl: DEFAULT_ERROR_TTL,
        }
    }
}

/// Read-through access to the shared cache with the configured TTL classes.
///
/// Backend errors are logged and degrade to misses; they never fail a request.
#[derive(Clone)]
pub struct Cached {
    cache: Arc<FrontendCache>,
    policy: CachePolicy,
}

impl Cached {
    pub fn new(cache: Arc<FrontendCache>, policy: CachePolicy) -> Self {
        Self { cache, policy }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn backend(&self) -> &Arc<FrontendCache> {
        &self.cache
    }

    /// Returns the cached value, or `None` on a miss.
    pub async fn lookup(&self, key: &str) -> Option<CacheValue> {
        match self.cache.get(key).await {
            Ok(Some(value)) => {
                debug!(key, "Cache HIT");
                metrics::counter!("cms_cache_lookups_total", "result" => "hit").increment(1);
                Some(value)
            }
            Ok(None) => {
                debug!(key, "Cache MISS");
                metrics::counter!("cms_cache_lookups_total", "result" => "miss").increment(1);
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache read failed");
                metrics::counter!("cms_cache_lookups_total", "result" => "error").increment(1);
                None
            }
        }
    }

    /// Stores a value with the long TTL.
    pub async fn store(&self, key: &str, value: CacheValue) {
        self.put(key, value, self.policy.ttl).await;
    }

    /// Stores a value with the short error TTL.
    pub async fn store_briefly(&self, key: &str, value: CacheValue) {
        self.put(key, value, self.policy.error_ttl).await;
    }

    async fn put(&self, key: &str, value: CacheValue, ttl: Duration) {
        if let Err(e) = self.cache.set(key, value, ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::MemoryCache;

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(
            keys::site_endpoint("example.com", "/blog"),
            "find_site_and_endpoint:example.com/blog"
        );
        assert_eq!(keys::page_by_alias("s1", "/about"), "page_site:s1:alias:/about");
        assert_eq!(keys::block_content("123"), "block_content_123");
    }

    #[test]
    fn test_cache_value_json_shape() {
        let json = serde_json::to_value(CacheValue::Page(None)).unwrap();
        assert_eq!(json["kind"], "page");
        assert!(json["value"].is_null());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_briefly_uses_error_ttl() {
        let cached = Cached::new(Arc::new(MemoryCache::new()), CachePolicy::default());

        cached.store("long", CacheValue::BlockContent("a".into())).await;
        cached
            .store_briefly("short", CacheValue::BlockContent("b".into()))
            .await;

        tokio::time::advance(Duration::from_secs(11)).await;

        assert!(cached.lookup("long").await.is_some());
        assert!(cached.lookup("short").await.is_none());
    }
}
