#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use cms_frontend::application::services::{CachePolicy, CacheValue, FrontendService};
use cms_frontend::domain::context::RequestContext;
use cms_frontend::domain::entities::{Block, Page, Site, Template, Translation};
use cms_frontend::domain::repositories::{PageQuery, SiteQuery, Store, TranslationStore};
use cms_frontend::error::AppError;
use cms_frontend::infrastructure::block_renderer::HtmlBlockRenderer;
use cms_frontend::infrastructure::cache::MemoryCache;
use cms_frontend::routes::app_router;
use cms_frontend::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory Store used by the HTTP tests.
///
/// Applies the subset of query filters the frontend sends and counts calls so
/// tests can observe caching.
#[derive(Default)]
pub struct InMemoryStore {
    pub sites: Vec<Site>,
    pub pages: Vec<Page>,
    pub blocks: HashMap<String, Block>,
    pub templates: HashMap<String, Template>,
    pub translations: Vec<Translation>,
    pub site_list_calls: AtomicUsize,
    pub page_list_calls: AtomicUsize,
    /// Delay applied to every site listing.
    pub delay: Option<Duration>,
    pub unhealthy: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.insert(block.id.clone(), block);
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.insert(template.id.clone(), template);
        self
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translations.push(translation);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn site_list_calls(&self) -> usize {
        self.site_list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn site_list(
        &self,
        _ctx: &RequestContext,
        query: SiteQuery,
    ) -> Result<Vec<Site>, AppError> {
        self.site_list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self
            .sites
            .iter()
            .filter(|s| query.status.is_none_or(|status| s.status == status))
            .filter(|s| query.soft_deleted_included || s.soft_deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn site_find_by_id(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Site>, AppError> {
        Ok(self.sites.iter().find(|s| s.id == id).cloned())
    }

    async fn page_list(
        &self,
        _ctx: &RequestContext,
        query: PageQuery,
    ) -> Result<Vec<Page>, AppError> {
        self.page_list_calls.fetch_add(1, Ordering::SeqCst);

        let pages = self
            .pages
            .iter()
            .filter(|p| query.id.as_ref().is_none_or(|id| &p.id == id))
            .filter(|p| query.site_id.as_ref().is_none_or(|id| &p.site_id == id))
            .filter(|p| query.alias.as_ref().is_none_or(|alias| &p.alias == alias))
            .filter(|p| query.status.is_none_or(|status| p.status == status))
            .filter(|p| query.soft_deleted_included || p.soft_deleted_at.is_none())
            .cloned();

        Ok(match query.limit {
            Some(limit) => pages.take(limit as usize).collect(),
            None => pages.collect(),
        })
    }

    async fn page_find_by_id(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Page>, AppError> {
        Ok(self.pages.iter().find(|p| p.id == id).cloned())
    }

    async fn block_find_by_id(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Block>, AppError> {
        Ok(self.blocks.get(id).cloned())
    }

    async fn template_find_by_id(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Template>, AppError> {
        Ok(self.templates.get(id).cloned())
    }

    async fn ping(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationStore for InMemoryStore {
    async fn translation_find_by_handle_or_id(
        &self,
        _ctx: &RequestContext,
        key: &str,
    ) -> Result<Option<Translation>, AppError> {
        if key == "broken" {
            return Err(AppError::store("translation lookup failed", json!({ "key": key })));
        }

        Ok(self
            .translations
            .iter()
            .find(|t| t.id == key || t.handle == key)
            .cloned())
    }
}

/// Fixture: a main site, a blog mounted under `/blog`, and a few pages.
pub fn fixture_store() -> InMemoryStore {
    let mut about = Page::new("p-about", "main", "/about", "<h1>[[PageTitle]]</h1>[[BLOCK_footer]]");
    about.title = "About us".to_string();
    about.template_id = Some("layout".to_string());

    let mut post = Page::new("p-post", "blog", "/hello", "<article>Hello from the blog</article>");
    post.title = "Hello".to_string();

    let user = Page::new("p-user", "main", "/user/:num", "<p>User profile</p>");
    let greeting = Page::new("p-greet", "main", "/greet", "[[TRANSLATION_greeting]]");

    InMemoryStore::new()
        .with_site(Site::new("main", vec!["example.com".to_string()]))
        .with_site(Site::new("blog", vec!["example.com/blog".to_string()]))
        .with_page(about)
        .with_page(post)
        .with_page(user)
        .with_page(greeting)
        .with_block(Block::new("footer", "<footer>(c) Example</footer>"))
        .with_template(Template::new(
            "layout",
            "<html><title>[[PageTitle]]</title><body>[[PageContent]]</body></html>",
        ))
        .with_translation(
            Translation::new("t1", "greeting")
                .with_text("en", "Hello")
                .with_text("de", "Hallo"),
        )
}

/// Builds the application state around `store` with an in-memory cache.
pub fn create_test_state(store: Arc<InMemoryStore>) -> AppState {
    let cache = Arc::new(MemoryCache::<CacheValue>::new());
    let pages: Arc<dyn Store> = store.clone();
    let frontend = FrontendService::new(pages, cache, CachePolicy::default())
        .with_translations(store)
        .with_block_editor(Arc::new(HtmlBlockRenderer::new()));

    AppState::new(Arc::new(frontend))
        .with_languages(vec!["en".to_string(), "de".to_string()], "en")
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

pub async fn insert_site(pool: &PgPool, id: &str, domain_names: &str, status: &str) {
    sqlx::query("INSERT INTO cms_site (id, name, domain_names, status) VALUES ($1, $1, $2, $3)")
        .bind(id)
        .bind(domain_names)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_page(pool: &PgPool, id: &str, site_id: &str, alias: &str, status: &str) {
    sqlx::query(
        "INSERT INTO cms_page (id, site_id, alias, content, title, status) \
         VALUES ($1, $2, $3, $4, $1, $5)",
    )
    .bind(id)
    .bind(site_id)
    .bind(alias)
    .bind(format!("<p>{}</p>", id))
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

/// Inserts into `cms_block` or `cms_template`, which share a shape.
pub async fn insert_content(pool: &PgPool, table: &str, id: &str, content: &str, status: &str) {
    sqlx::query(&format!(
        "INSERT INTO {} (id, name, content, status) VALUES ($1, $1, $2, $3)",
        table
    ))
    .bind(id)
    .bind(content)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_translation(pool: &PgPool, id: &str, handle: &str, content: &str) {
    sqlx::query(
        "INSERT INTO cms_translation (id, handle, content, status) VALUES ($1, $2, $3, 'active')",
    )
    .bind(id)
    .bind(handle)
    .bind(content)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn soft_delete(pool: &PgPool, table: &str, id: &str) {
    sqlx::query(&format!(
        "UPDATE {} SET soft_deleted_at = now() WHERE id = $1",
        table
    ))
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
}
