//! Page resolution within a site: exact alias, `/`-prefixed alias, patterns.

use dashmap::DashMap;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, error};

use crate::application::services::alias_pattern::{AliasPattern, build_patterns};
use crate::application::services::cached::{CacheValue, Cached, keys};
use crate::domain::context::RequestContext;
use crate::domain::entities::{Page, Status};
use crate::domain::repositories::query::{COLUMN_ALIAS, COLUMN_ID};
use crate::domain::repositories::{PageQuery, Store};
use crate::error::AppError;

/// Maps `(site_id, alias)` to a page.
///
/// Compiled pattern regexes are memoised per regex source for the life of the
/// service; the pattern lists themselves live in the shared cache.
pub struct PageService<S: Store + ?Sized> {
    store: Arc<S>,
    cache: Cached,
    compiled: DashMap<String, Option<Regex>>,
}

impl<S: Store + ?Sized> PageService<S> {
    pub fn new(store: Arc<S>, cache: Cached) -> Self {
        Self {
            store,
            cache,
            compiled: DashMap::new(),
        }
    }

    /// Resolves a page, stopping at the first hit:
    ///
    /// 1. exact `(site_id, alias)` lookup
    /// 2. the same lookup with `/` prepended
    /// 3. pattern aliases of the site, most specific first
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if any Store read fails.
    pub async fn resolve_page(
        &self,
        ctx: &RequestContext,
        site_id: &str,
        alias: &str,
    ) -> Result<Option<Page>, AppError> {
        if let Some(page) = self.page_by_alias(ctx, site_id, alias).await? {
            return Ok(Some(page));
        }

        if !alias.starts_with('/') {
            let slashed = format!("/{}", alias);
            if let Some(page) = self.page_by_alias(ctx, site_id, &slashed).await? {
                return Ok(Some(page));
            }
        }

        self.page_by_pattern(ctx, site_id, alias).await
    }

    /// Exact alias lookup among the site's active pages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on Store failure.
    pub async fn page_by_alias(
        &self,
        ctx: &RequestContext,
        site_id: &str,
        alias: &str,
    ) -> Result<Option<Page>, AppError> {
        let key = keys::page_by_alias(site_id, alias);

        if let Some(CacheValue::Page(hit)) = self.cache.lookup(&key).await {
            return Ok(hit);
        }

        let query = PageQuery::new()
            .site_id(site_id)
            .alias(alias)
            .status(Status::Active)
            .limit(1);

        match ctx.guard(self.store.page_list(ctx, query)).await {
            Ok(pages) => {
                let page = pages.into_iter().find(Page::is_active);
                self.cache.store(&key, CacheValue::Page(page.clone())).await;
                Ok(page)
            }
            Err(e) => {
                Err(self
                    .on_store_error(&key, CacheValue::Page(None), "page_list", e)
                    .await)
            }
        }
    }

    /// Active page by id, cached under `page_id:<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on Store failure.
    pub async fn page_by_id(
        &self,
        ctx: &RequestContext,
        page_id: &str,
    ) -> Result<Option<Page>, AppError> {
        let key = keys::page_by_id(page_id);

        if let Some(CacheValue::Page(hit)) = self.cache.lookup(&key).await {
            return Ok(hit);
        }

        match ctx.guard(self.store.page_find_by_id(ctx, page_id)).await {
            Ok(page) => {
                let page = page.filter(Page::is_active);
                self.cache.store(&key, CacheValue::Page(page.clone())).await;
                Ok(page)
            }
            Err(e) => {
                Err(self
                    .on_store_error(&key, CacheValue::Page(None), "page_find_by_id", e)
                    .await)
            }
        }
    }

    /// Pattern aliases of a site, sorted by precedence, built once per TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on Store failure.
    pub async fn alias_patterns(
        &self,
        ctx: &RequestContext,
        site_id: &str,
    ) -> Result<Vec<AliasPattern>, AppError> {
        let key = keys::alias_patterns(site_id);

        if let Some(CacheValue::AliasPatterns(patterns)) = self.cache.lookup(&key).await {
            return Ok(patterns);
        }

        let query = PageQuery::new()
            .site_id(site_id)
            .status(Status::Active)
            .columns(&[COLUMN_ID, COLUMN_ALIAS]);

        match ctx.guard(self.store.page_list(ctx, query)).await {
            Ok(pages) => {
                let patterns = build_patterns(
                    pages
                        .into_iter()
                        .filter(Page::has_pattern_alias)
                        .map(|page| (page.id, page.alias)),
                );
                debug!(site_id, count = patterns.len(), "Built alias patterns");
                self.cache
                    .store(&key, CacheValue::AliasPatterns(patterns.clone()))
                    .await;
                Ok(patterns)
            }
            Err(e) => {
                Err(self
                    .on_store_error(&key, CacheValue::AliasPatterns(Vec::new()), "page_list", e)
                    .await)
            }
        }
    }

    async fn page_by_pattern(
        &self,
        ctx: &RequestContext,
        site_id: &str,
        alias: &str,
    ) -> Result<Option<Page>, AppError> {
        for pattern in self.alias_patterns(ctx, site_id).await? {
            if !self.pattern_matches(&pattern, alias) {
                continue;
            }

            debug!(
                site_id,
                alias,
                pattern = %pattern.alias,
                page_id = %pattern.page_id,
                "Alias pattern matched"
            );

            // A stale pattern list may point at a page that is gone.
            if let Some(page) = self.page_by_id(ctx, &pattern.page_id).await? {
                return Ok(Some(page));
            }
        }

        Ok(None)
    }

    fn pattern_matches(&self, pattern: &AliasPattern, alias: &str) -> bool {
        if let Some(entry) = self.compiled.get(&pattern.regex) {
            return entry.as_ref().is_some_and(|re| re.is_match(alias));
        }

        let regex = pattern.to_regex();
        let matched = regex.as_ref().is_some_and(|re| re.is_match(alias));
        self.compiled.insert(pattern.regex.clone(), regex);
        matched
    }

    async fn on_store_error(
        &self,
        key: &str,
        negative: CacheValue,
        operation: &'static str,
        e: AppError,
    ) -> AppError {
        if matches!(e, AppError::Cancelled) {
            return e;
        }

        error!(key, operation, error = %e, "Store read failed");
        metrics::counter!("cms_store_errors_total", "operation" => operation).increment(1);
        self.cache.store_briefly(key, negative).await;
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::cached::CachePolicy;
    use crate::domain::repositories::MockStore;
    use crate::infrastructure::cache::MemoryCache;
    use serde_json::json;

    fn service(store: MockStore) -> PageService<MockStore> {
        PageService::new(
            Arc::new(store),
            Cached::new(Arc::new(MemoryCache::new()), CachePolicy::default()),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new("example.com", "/")
    }

    fn is_pattern_listing(query: &PageQuery) -> bool {
        query.alias.is_none() && query.columns == [COLUMN_ID, COLUMN_ALIAS]
    }

    #[tokio::test]
    async fn test_exact_alias_hit() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .withf(|_, q| {
                q.site_id.as_deref() == Some("s1") && q.alias.as_deref() == Some("/about")
            })
            .times(1)
            .returning(|_, _| Ok(vec![Page::new("p1", "s1", "/about", "About")]));

        let service = service(store);

        let page = service.resolve_page(&ctx(), "s1", "/about").await.unwrap();
        assert_eq!(page.unwrap().id, "p1");
    }

    #[tokio::test]
    async fn test_leading_slash_normalization() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .withf(|_, q| q.alias.as_deref() == Some("about"))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        store
            .expect_page_list()
            .withf(|_, q| q.alias.as_deref() == Some("/about"))
            .times(1)
            .returning(|_, _| Ok(vec![Page::new("p1", "s1", "/about", "About")]));

        let service = service(store);

        let page = service.resolve_page(&ctx(), "s1", "about").await.unwrap();
        assert_eq!(page.unwrap().alias, "/about");
    }

    #[tokio::test]
    async fn test_pattern_match() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .withf(|_, q| q.alias.is_some())
            .returning(|_, _| Ok(vec![]));
        store
            .expect_page_list()
            .withf(|_, q| is_pattern_listing(q))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    Page::new("home", "s1", "/", ""),
                    Page::new("user", "s1", "/user/:num", ""),
                ])
            });
        store
            .expect_page_find_by_id()
            .withf(|_, id| id == "user")
            .times(1)
            .returning(|_, _| Ok(Some(Page::new("user", "s1", "/user/:num", "User"))));

        let service = service(store);

        let page = service.resolve_page(&ctx(), "s1", "/user/42").await.unwrap();
        assert_eq!(page.unwrap().id, "user");

        assert!(service.resolve_page(&ctx(), "s1", "/user/abc").await.unwrap().is_none());
        assert!(service.resolve_page(&ctx(), "s1", "/user/42/extra").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_most_specific_pattern_wins() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .withf(|_, q| q.alias.is_some())
            .returning(|_, _| Ok(vec![]));
        store
            .expect_page_list()
            .withf(|_, q| is_pattern_listing(q))
            .returning(|_, _| {
                Ok(vec![
                    Page::new("catchall", "s1", "/:all", ""),
                    Page::new("post", "s1", "/blog/:any", ""),
                ])
            });
        store
            .expect_page_find_by_id()
            .withf(|_, id| id == "post")
            .times(1)
            .returning(|_, _| Ok(Some(Page::new("post", "s1", "/blog/:any", "Post"))));

        let service = service(store);

        let page = service.resolve_page(&ctx(), "s1", "/blog/hello").await.unwrap();
        assert_eq!(page.unwrap().id, "post");
    }

    #[tokio::test]
    async fn test_stale_pattern_falls_through_to_next() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .withf(|_, q| q.alias.is_some())
            .returning(|_, _| Ok(vec![]));
        store
            .expect_page_list()
            .withf(|_, q| is_pattern_listing(q))
            .returning(|_, _| {
                Ok(vec![
                    Page::new("gone", "s1", "/blog/:any", ""),
                    Page::new("catchall", "s1", "/:all", ""),
                ])
            });
        store
            .expect_page_find_by_id()
            .withf(|_, id| id == "gone")
            .returning(|_, _| Ok(None));
        store
            .expect_page_find_by_id()
            .withf(|_, id| id == "catchall")
            .returning(|_, _| Ok(Some(Page::new("catchall", "s1", "/:all", ""))));

        let service = service(store);

        let page = service.resolve_page(&ctx(), "s1", "/blog/x").await.unwrap();
        assert_eq!(page.unwrap().id, "catchall");
    }

    #[tokio::test]
    async fn test_repeat_resolution_is_served_from_cache() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .withf(|_, q| q.alias.as_deref() == Some("/about"))
            .times(1)
            .returning(|_, _| Ok(vec![Page::new("p1", "s1", "/about", "About")]));

        let service = service(store);

        let first = service.resolve_page(&ctx(), "s1", "/about").await.unwrap();
        let second = service.resolve_page(&ctx(), "s1", "/about").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut store = MockStore::new();
        store
            .expect_page_list()
            .times(1)
            .returning(|_, _| Err(AppError::store("timeout", json!({}))));

        let service = service(store);

        let result = service.resolve_page(&ctx(), "s1", "/about").await;
        assert!(matches!(result, Err(AppError::Store { .. })));

        // Negative result cached briefly: no second Store call.
        let again = service.page_by_alias(&ctx(), "s1", "/about").await.unwrap();
        assert!(again.is_none());
    }
}
