//! Render orchestrator: `(host, path)` in, HTML string out.

use html_escape::encode_text;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::application::services::cached::{
    CachePolicy, CacheValue, Cached, FrontendCache, SiteEndpoint, keys,
};
use crate::application::services::middleware_registry::MiddlewareRegistry;
use crate::application::services::page_service::PageService;
use crate::application::services::render_service::{
    PageMeta, RenderService, convert_block_json_to_html,
};
use crate::application::services::site_service::SiteService;
use crate::domain::context::RequestContext;
use crate::domain::entities::{Page, PageEditor, Template};
use crate::domain::extensions::{BlockEditorRenderer, MiddlewareDispatcher, Shortcode};
use crate::domain::repositories::{Store, TranslationStore};
use crate::error::AppError;

pub const ERROR_LOADING_PAGE: &str = "<div>Error loading page</div>";
pub const ERROR_OCCURRED: &str = "<div>Error occurred</div>";

/// Plain message for requests no site serves. The host is HTML-escaped.
pub fn domain_not_supported(domain: &str) -> String {
    format!("Domain not supported: {}", encode_text(domain))
}

/// Message for an alias no page matches. The alias is HTML-escaped.
pub fn page_not_found(alias: &str) -> String {
    format!("<div>Page with alias '{}' not found</div>", encode_text(alias))
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("cms_render_total", "outcome" => outcome).increment(1);
}

/// Resolves site and page for a request and renders it.
///
/// Owns the shared cache and every service that reads through it. Every
/// failure path produces a renderable string; nothing here panics or returns
/// an HTTP error.
///
/// # Example
///
/// ```ignore
/// let frontend = FrontendService::new(store, cache, CachePolicy::default())
///     .with_shortcodes(vec![Arc::new(YearShortcode)])
///     .with_middlewares(Arc::new(registry));
///
/// let ctx = RequestContext::new("example.com", "/about");
/// let html = frontend.render_by_host_and_path(&ctx).await;
/// ```
pub struct FrontendService<S: Store + ?Sized = dyn Store> {
    store: Arc<S>,
    cache: Cached,
    sites: SiteService<S>,
    pages: PageService<S>,
    renderer: RenderService<S>,
    block_editor: Option<Arc<dyn BlockEditorRenderer>>,
    middlewares: Arc<dyn MiddlewareDispatcher>,
}

impl<S: Store + ?Sized> FrontendService<S> {
    pub fn new(store: Arc<S>, cache: Arc<FrontendCache>, policy: CachePolicy) -> Self {
        let cache = Cached::new(cache, policy);

        Self {
            sites: SiteService::new(store.clone(), cache.clone()),
            pages: PageService::new(store.clone(), cache.clone()),
            renderer: RenderService::new(store.clone(), cache.clone()),
            store,
            cache,
            block_editor: None,
            middlewares: Arc::new(MiddlewareRegistry::new()),
        }
    }

    /// Registers shortcodes; they run in the given order.
    pub fn with_shortcodes(mut self, shortcodes: Vec<Arc<dyn Shortcode>>) -> Self {
        self.renderer = self.renderer.with_shortcodes(shortcodes);
        self
    }

    pub fn with_translations(mut self, translations: Arc<dyn TranslationStore>) -> Self {
        self.renderer = self.renderer.with_translations(translations);
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.renderer = self.renderer.with_default_language(language);
        self
    }

    pub fn with_block_editor(mut self, renderer: Arc<dyn BlockEditorRenderer>) -> Self {
        self.block_editor = Some(renderer);
        self
    }

    pub fn with_middlewares(mut self, dispatcher: Arc<dyn MiddlewareDispatcher>) -> Self {
        self.middlewares = dispatcher;
        self
    }

    pub fn sites(&self) -> &SiteService<S> {
        &self.sites
    }

    pub fn pages(&self) -> &PageService<S> {
        &self.pages
    }

    pub fn renderer(&self) -> &RenderService<S> {
        &self.renderer
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache.policy()
    }

    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await
    }

    pub async fn cache_healthy(&self) -> bool {
        self.cache.backend().health_check().await
    }

    /// Renders the page addressed by the context's host and path.
    ///
    /// - URIs ending in `.ico` render as an empty string
    /// - no matching site (or a Store fault) renders "Domain not supported"
    /// - the alias is `host + path` with the site's endpoint stripped
    pub async fn render_by_host_and_path(&self, ctx: &RequestContext) -> String {
        let domain = ctx.host();
        let path = ctx.path();

        if path.ends_with(".ico") || ctx.uri().ends_with(".ico") {
            return String::new();
        }

        let resolved = self.sites.resolve_site(ctx, domain, path).await;
        let SiteEndpoint { site, endpoint } = match resolved {
            Ok(Some(found)) => found,
            Ok(None) => {
                record_outcome("domain_not_supported");
                return domain_not_supported(domain);
            }
            Err(e) => {
                error!(domain, path, error = %e, code = e.code(), "Site resolution failed");
                record_outcome("domain_not_supported");
                return domain_not_supported(domain);
            }
        };

        let page_path = format!("{}{}", domain, path);
        let alias = page_path.strip_prefix(endpoint.as_str()).unwrap_or(&page_path);

        debug!(
            domain,
            path,
            site_id = %site.id,
            endpoint = %endpoint,
            alias,
            "Rendering request"
        );

        self.page_render_html_by_site_and_alias(ctx, &site.id, alias)
            .await
    }

    /// Renders the page of `site_id` matching `alias`.
    ///
    /// The page is wrapped in its template (when active), run through the
    /// content pipeline and finally through its middlewares.
    pub async fn page_render_html_by_site_and_alias(
        &self,
        ctx: &RequestContext,
        site_id: &str,
        alias: &str,
    ) -> String {
        let page = match self.pages.resolve_page(ctx, site_id, alias).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                warn!(site_id, alias, "Page not found");
                record_outcome("page_not_found");
                return page_not_found(alias);
            }
            Err(e) => {
                error!(site_id, alias, error = %e, code = e.code(), "Page resolution failed");
                record_outcome("error");
                return ERROR_LOADING_PAGE.to_string();
            }
        };

        match self.render_page(ctx, &page).await {
            Ok(html) => {
                record_outcome("ok");
                html
            }
            Err(e) => {
                error!(
                    site_id,
                    alias,
                    page_id = %page.id,
                    error = %e,
                    details = %e.details(),
                    "Page render failed"
                );
                record_outcome("error");
                ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Renders a template by id through the content pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty id,
    /// [`AppError::Render`] for a missing or inactive template, and any
    /// Store or pipeline error.
    pub async fn template_render_html_by_id(
        &self,
        ctx: &RequestContext,
        template_id: &str,
        meta: &PageMeta,
    ) -> Result<String, AppError> {
        if template_id.is_empty() {
            return Err(AppError::validation("template id is empty", json!({})));
        }

        let template = self
            .template(ctx, template_id)
            .await?
            .ok_or_else(|| {
                AppError::render("template not found", json!({"template_id": template_id}))
            })?;

        if !template.is_active() {
            return Err(AppError::render(
                format!("template {} is not active", template_id),
                json!({"template_id": template_id}),
            ));
        }

        self.renderer.render(ctx, &template.content, meta).await
    }

    async fn render_page(&self, ctx: &RequestContext, page: &Page) -> Result<String, AppError> {
        let page_content = if page.editor == PageEditor::BlockEditor {
            convert_block_json_to_html(self.block_editor.as_deref(), &page.content)
        } else {
            page.content.clone()
        };

        let content = match page.template_id() {
            None => page_content.clone(),
            Some(template_id) => match self.template(ctx, template_id).await {
                Ok(Some(template)) if template.is_active() => template.content,
                Ok(Some(_)) => {
                    warn!(page_id = %page.id, template_id, "Template inactive, using page content");
                    page_content.clone()
                }
                Ok(None) => {
                    warn!(page_id = %page.id, template_id, "Template not found, using page content");
                    page_content.clone()
                }
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    error!(
                        page_id = %page.id,
                        template_id,
                        error = %e,
                        "Template load failed, using page content"
                    );
                    page_content.clone()
                }
            },
        };

        let meta = PageMeta::from_page(page, page_content, ctx.language());
        let html = self.renderer.render(ctx, &content, &meta).await?;

        Ok(self
            .middlewares
            .apply(ctx, html, &page.middlewares_before, &page.middlewares_after)
            .await)
    }

    async fn template(
        &self,
        ctx: &RequestContext,
        template_id: &str,
    ) -> Result<Option<Template>, AppError> {
        let key = keys::template(template_id);

        if let Some(CacheValue::Template(hit)) = self.cache.lookup(&key).await {
            return Ok(hit);
        }

        match ctx.guard(self.store.template_find_by_id(ctx, template_id)).await {
            Ok(template) => {
                self.cache
                    .store(&key, CacheValue::Template(template.clone()))
                    .await;
                Ok(template)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                metrics::counter!("cms_store_errors_total", "operation" => "template_find_by_id")
                    .increment(1);
                self.cache
                    .store_briefly(&key, CacheValue::Template(None))
                    .await;
                Err(e)
            }
        }
    }
}
