//! Content pipeline: turns page or template content into final HTML.
//!
//! Stages run strictly in order, each feeding the next:
//!
//! 1. placeholders (`[[PageTitle]]`, `[[ PageContent ]]`, ...)
//! 2. blocks (`[[BLOCK_<id>]]`)
//! 3. shortcodes (`<alias attr="x">` / `<alias>body</alias>` / `<alias/>`)
//! 4. translations (`[[TRANSLATION_<id or handle>]]`)

use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, warn};

use crate::application::services::cached::{CacheValue, Cached, keys};
use crate::domain::context::RequestContext;
use crate::domain::entities::Page;
use crate::domain::extensions::{BlockEditorRenderer, EditorBlock, Shortcode};
use crate::domain::repositories::{Store, TranslationStore};
use crate::error::AppError;

/// Language used when neither the request nor the page meta carries one.
pub const DEFAULT_LANGUAGE: &str = "en";

pub const MALFORMED_BLOCK_CONTENT: &str = "Malformed block content";
pub const BLOCK_CONTENT_PARSE_ERROR: &str = "Error parsing block content";
pub const BLOCK_EDITOR_NOT_CONFIGURED: &str = "Block editor not configured";

static BLOCK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[ ?BLOCK_([^\[\]\s]+) ?\]\]").expect("block token regex is valid")
});

static TRANSLATION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[ ?TRANSLATION_([^\[\]\s]+) ?\]\]")
        .expect("translation token regex is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w\-:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+)))?"#)
        .expect("attribute regex is valid")
});

/// Values substituted into `[[Key]]` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub page_content: String,
    pub page_canonical_url: String,
    pub page_meta_description: String,
    pub page_meta_keywords: String,
    pub page_meta_robots: String,
    pub page_title: String,
    pub language: String,
}

impl PageMeta {
    /// Builds the meta record from a page's own fields.
    ///
    /// `page_content` is passed separately because block-editor pages are
    /// converted to HTML first.
    pub fn from_page(page: &Page, page_content: String, language: &str) -> Self {
        Self {
            page_content,
            page_canonical_url: page.canonical_url.clone(),
            page_meta_description: page.meta_description.clone(),
            page_meta_keywords: page.meta_keywords.clone(),
            page_meta_robots: page.meta_robots.clone(),
            page_title: page.title.clone(),
            language: language.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = title.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn placeholders(&self) -> [(&'static str, &str); 7] {
        [
            ("PageContent", self.page_content.as_str()),
            ("PageCanonicalUrl", self.page_canonical_url.as_str()),
            ("PageMetaDescription", self.page_meta_description.as_str()),
            ("PageMetaKeywords", self.page_meta_keywords.as_str()),
            ("PageMetaRobots", self.page_meta_robots.as_str()),
            ("PageRobots", self.page_meta_robots.as_str()),
            ("PageTitle", self.page_title.as_str()),
        ]
    }
}

/// Substitutes `[[Key]]` and `[[ Key ]]` placeholders.
///
/// `PageContent` goes first, so placeholders inside the page body are
/// substituted as well. Unknown keys are left verbatim.
pub fn replace_placeholders(content: &str, meta: &PageMeta) -> String {
    let mut content = content.to_string();

    for (key, value) in meta.placeholders() {
        let tight = format!("[[{}]]", key);
        let spaced = format!("[[ {} ]]", key);
        if content.contains(&tight) {
            content = content.replace(&tight, value);
        }
        if content.contains(&spaced) {
            content = content.replace(&spaced, value);
        }
    }

    content
}

/// Converts serialized block-editor content into HTML.
///
/// Defects never fail the page: they render an inline diagnostic instead.
pub fn convert_block_json_to_html(
    renderer: Option<&dyn BlockEditorRenderer>,
    json: &str,
) -> String {
    let Some(renderer) = renderer else {
        warn!("Block editor content found but no renderer is configured");
        return BLOCK_EDITOR_NOT_CONFIGURED.to_string();
    };

    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Block editor content is not valid JSON");
            return MALFORMED_BLOCK_CONTENT.to_string();
        }
    };

    match serde_json::from_value::<Vec<EditorBlock>>(value) {
        Ok(blocks) => renderer.render(&blocks),
        Err(e) => {
            warn!(error = %e, "Block editor content is not a block list");
            BLOCK_CONTENT_PARSE_ERROR.to_string()
        }
    }
}

fn distinct_ids(token: &Regex, content: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in token.captures_iter(content).filter_map(|caps| caps.get(1)) {
        let id = id.as_str();
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

fn replace_ids(token: &Regex, content: &str, resolved: &HashMap<String, String>) -> String {
    token
        .replace_all(content, |caps: &Captures| {
            caps.get(1)
                .and_then(|id| resolved.get(id.as_str()))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Parses `key="v" key='v' key=v flag` into a map. Bare flags map to "".
pub fn parse_attributes(raw: &str) -> BTreeMap<String, String> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Some((key, value))
        })
        .collect()
}

struct ShortcodeTag {
    range: Range<usize>,
    attrs: BTreeMap<String, String>,
    body: String,
}

/// A shortcode with its tag regexes built once at registration.
struct CompiledShortcode {
    shortcode: Arc<dyn Shortcode>,
    paired: Regex,
    single: Regex,
}

impl CompiledShortcode {
    fn compile(shortcode: Arc<dyn Shortcode>) -> Option<Self> {
        let alias = regex::escape(shortcode.alias());
        if alias.is_empty() {
            warn!("Ignoring shortcode with an empty alias");
            return None;
        }

        let paired = format!(r"(?s)<{alias}(\s(?:[^>]*[^/>])?)?>(.*?)</{alias}\s*>");
        let single = format!(r"<{alias}(\s[^>]*?)?\s*/?>");

        match (Regex::new(&paired), Regex::new(&single)) {
            (Ok(paired), Ok(single)) => Some(Self {
                shortcode,
                paired,
                single,
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!(alias = shortcode.alias(), error = %e, "Ignoring shortcode");
                None
            }
        }
    }

    /// Paired tags first; unpaired tags only where no paired tag matched.
    fn find_tags(&self, content: &str) -> Vec<ShortcodeTag> {
        let mut tags: Vec<ShortcodeTag> = Vec::new();

        for caps in self.paired.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            tags.push(ShortcodeTag {
                range: whole.range(),
                attrs: parse_attributes(caps.get(1).map_or("", |m| m.as_str())),
                body: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            });
        }

        for caps in self.single.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            let overlaps = tags
                .iter()
                .any(|t| t.range.start < whole.end() && whole.start() < t.range.end);
            if overlaps {
                continue;
            }
            tags.push(ShortcodeTag {
                range: whole.range(),
                attrs: parse_attributes(caps.get(1).map_or("", |m| m.as_str())),
                body: String::new(),
            });
        }

        tags.sort_by_key(|t| t.range.start);
        tags
    }
}

/// Runs the content pipeline.
///
/// Blocks and translations are read through the shared cache. Shortcodes
/// run in registration order; any shortcode error aborts the render.
pub struct RenderService<S: Store + ?Sized> {
    store: Arc<S>,
    cache: Cached,
    shortcodes: Vec<CompiledShortcode>,
    translations: Option<Arc<dyn TranslationStore>>,
    default_language: String,
}

impl<S: Store + ?Sized> RenderService<S> {
    pub fn new(store: Arc<S>, cache: Cached) -> Self {
        Self {
            store,
            cache,
            shortcodes: Vec::new(),
            translations: None,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_shortcodes(mut self, shortcodes: Vec<Arc<dyn Shortcode>>) -> Self {
        self.shortcodes = shortcodes
            .into_iter()
            .filter_map(CompiledShortcode::compile)
            .collect();
        self
    }

    pub fn with_translations(mut self, translations: Arc<dyn TranslationStore>) -> Self {
        self.translations = Some(translations);
        self
    }

    /// Language whose text is used when a translation lacks the requested one.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Renders `content` with the given meta.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing shortcode, or [`AppError::Cancelled`]
    /// if the request was cancelled mid-render.
    pub async fn render(
        &self,
        ctx: &RequestContext,
        content: &str,
        meta: &PageMeta,
    ) -> Result<String, AppError> {
        let content = replace_placeholders(content, meta);
        let content = self.render_blocks(ctx, content).await?;
        let content = self.render_shortcodes(ctx, content).await?;

        let language = if meta.language.is_empty() {
            DEFAULT_LANGUAGE
        } else {
            meta.language.as_str()
        };

        self.render_translations(ctx, content, language).await
    }

    async fn render_blocks(
        &self,
        ctx: &RequestContext,
        content: String,
    ) -> Result<String, AppError> {
        let ids = distinct_ids(&BLOCK_TOKEN, &content);
        if ids.is_empty() {
            return Ok(content);
        }

        let mut resolved = HashMap::with_capacity(ids.len());
        for id in ids {
            let html = self.block_content(ctx, &id).await?;
            resolved.insert(id, html);
        }

        Ok(replace_ids(&BLOCK_TOKEN, &content, &resolved))
    }

    /// Content of an active block, or "" if it is missing or inactive.
    ///
    /// A Store failure is logged and also resolves to "" (cached briefly), so
    /// one broken block never takes down the page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cancelled`] only.
    pub async fn block_content(
        &self,
        ctx: &RequestContext,
        block_id: &str,
    ) -> Result<String, AppError> {
        let key = keys::block_content(block_id);

        if let Some(CacheValue::BlockContent(html)) = self.cache.lookup(&key).await {
            return Ok(html);
        }

        match ctx.guard(self.store.block_find_by_id(ctx, block_id)).await {
            Ok(block) => {
                let html = match block {
                    Some(block) if block.is_active() => block.content,
                    Some(_) => {
                        debug!(block_id, "Block is inactive");
                        String::new()
                    }
                    None => {
                        warn!(block_id, "Block not found");
                        String::new()
                    }
                };
                self.cache.store(&key, CacheValue::BlockContent(html.clone())).await;
                Ok(html)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                error!(block_id, error = %e, "Failed to load block");
                metrics::counter!("cms_store_errors_total", "operation" => "block_find_by_id")
                    .increment(1);
                self.cache
                    .store_briefly(&key, CacheValue::BlockContent(String::new()))
                    .await;
                Ok(String::new())
            }
        }
    }

    async fn render_shortcodes(
        &self,
        ctx: &RequestContext,
        content: String,
    ) -> Result<String, AppError> {
        let mut content = content;

        for compiled in &self.shortcodes {
            let tags = compiled.find_tags(&content);
            if tags.is_empty() {
                continue;
            }

            let alias = compiled.shortcode.alias();
            let mut out = String::with_capacity(content.len());
            let mut last = 0;

            for tag in tags {
                out.push_str(&content[last..tag.range.start]);

                let rendered = ctx
                    .guard(compiled.shortcode.render(ctx, &tag.body, &tag.attrs))
                    .await
                    .inspect_err(|e| error!(alias, error = %e, "Shortcode failed"))?;

                out.push_str(&rendered);
                last = tag.range.end;
            }

            out.push_str(&content[last..]);
            content = out;
        }

        Ok(content)
    }

    async fn render_translations(
        &self,
        ctx: &RequestContext,
        content: String,
        language: &str,
    ) -> Result<String, AppError> {
        let Some(translations) = &self.translations else {
            return Ok(content);
        };

        let ids = distinct_ids(&TRANSLATION_TOKEN, &content);
        if ids.is_empty() {
            return Ok(content);
        }

        let mut resolved = HashMap::with_capacity(ids.len());
        for id in ids {
            let text = self
                .translation_text(ctx, translations.as_ref(), &id, language)
                .await?;
            resolved.insert(id, text);
        }

        Ok(replace_ids(&TRANSLATION_TOKEN, &content, &resolved))
    }

    async fn translation_text(
        &self,
        ctx: &RequestContext,
        translations: &dyn TranslationStore,
        key: &str,
        language: &str,
    ) -> Result<String, AppError> {
        let cache_key = keys::translation(key);

        let translation = match self.cache.lookup(&cache_key).await {
            Some(CacheValue::Translation(hit)) => hit,
            _ => match ctx
                .guard(translations.translation_find_by_handle_or_id(ctx, key))
                .await
            {
                Ok(found) => {
                    let found = found.filter(|t| t.is_active());
                    self.cache
                        .store(&cache_key, CacheValue::Translation(found.clone()))
                        .await;
                    found
                }
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    error!(key, error = %e, "Failed to load translation");
                    self.cache
                        .store_briefly(&cache_key, CacheValue::Translation(None))
                        .await;
                    None
                }
            },
        };

        Ok(translation
            .as_ref()
            .and_then(|t| t.text_for(language, &self.default_language))
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::cached::CachePolicy;
    use crate::domain::entities::{Block, Status, Translation};
    use crate::domain::repositories::{MockStore, MockTranslationStore};
    use crate::infrastructure::cache::MemoryCache;
    use async_trait::async_trait;
    use serde_json::json;

    fn service(store: MockStore) -> RenderService<MockStore> {
        RenderService::new(
            Arc::new(store),
            Cached::new(Arc::new(MemoryCache::new()), CachePolicy::default()),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new("example.com", "/")
    }

    struct Year;

    #[async_trait]
    impl Shortcode for Year {
        fn alias(&self) -> &str {
            "year"
        }

        async fn render(
            &self,
            _ctx: &RequestContext,
            _content: &str,
            _attrs: &BTreeMap<String, String>,
        ) -> Result<String, AppError> {
            Ok("2024".to_string())
        }
    }

    struct Shout;

    #[async_trait]
    impl Shortcode for Shout {
        fn alias(&self) -> &str {
            "shout"
        }

        async fn render(
            &self,
            _ctx: &RequestContext,
            content: &str,
            attrs: &BTreeMap<String, String>,
        ) -> Result<String, AppError> {
            let mark = attrs.get("mark").map(String::as_str).unwrap_or("!");
            Ok(format!("{}{}", content.to_uppercase(), mark))
        }
    }

    struct Broken;

    #[async_trait]
    impl Shortcode for Broken {
        fn alias(&self) -> &str {
            "broken"
        }

        async fn render(
            &self,
            _ctx: &RequestContext,
            _content: &str,
            _attrs: &BTreeMap<String, String>,
        ) -> Result<String, AppError> {
            Err(AppError::render("boom", json!({})))
        }
    }

    struct ListRenderer;

    impl BlockEditorRenderer for ListRenderer {
        fn render(&self, blocks: &[EditorBlock]) -> String {
            blocks.iter().map(|b| format!("<{0}></{0}>", b.kind)).collect()
        }
    }

    #[test]
    fn test_placeholders_both_spellings() {
        let meta = PageMeta::default().with_title("Hi");

        let out = replace_placeholders("[[PageTitle]]|[[ PageTitle ]]|[[Unknown]]", &meta);

        assert_eq!(out, "Hi|Hi|[[Unknown]]");
    }

    #[test]
    fn test_page_content_substituted_first() {
        let meta = PageMeta {
            page_content: "<h1>[[PageTitle]]</h1>".to_string(),
            page_title: "Home".to_string(),
            ..PageMeta::default()
        };

        let out = replace_placeholders("<main>[[PageContent]]</main>", &meta);

        assert_eq!(out, "<main><h1>Home</h1></main>");
    }

    #[test]
    fn test_legacy_robots_placeholder() {
        let meta = PageMeta {
            page_meta_robots: "noindex".to_string(),
            ..PageMeta::default()
        };

        assert_eq!(
            replace_placeholders("[[PageRobots]] [[PageMetaRobots]]", &meta),
            "noindex noindex"
        );
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(r#" a="1" b='two' c=3 flag"#);

        assert_eq!(attrs.get("a").unwrap(), "1");
        assert_eq!(attrs.get("b").unwrap(), "two");
        assert_eq!(attrs.get("c").unwrap(), "3");
        assert_eq!(attrs.get("flag").unwrap(), "");
    }

    #[tokio::test]
    async fn test_inactive_block_renders_empty() {
        let mut store = MockStore::new();
        store
            .expect_block_find_by_id()
            .withf(|_, id| id == "123")
            .times(1)
            .returning(|_, _| {
                let mut block = Block::new("123", "secret");
                block.status = Status::Inactive;
                Ok(Some(block))
            });

        let service = service(store);
        let meta = PageMeta::default().with_title("Hi");

        let out = service
            .render(&ctx(), "[[PageTitle]] says [[BLOCK_123]]", &meta)
            .await
            .unwrap();

        assert_eq!(out, "Hi says ");
    }

    #[tokio::test]
    async fn test_blocks_fetched_once_per_distinct_id() {
        let mut store = MockStore::new();
        store
            .expect_block_find_by_id()
            .withf(|_, id| id == "nav")
            .times(1)
            .returning(|_, _| Ok(Some(Block::new("nav", "<nav/>"))));
        store
            .expect_block_find_by_id()
            .withf(|_, id| id == "gone")
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(store);

        let content = "[[BLOCK_nav]][[ BLOCK_nav ]][[BLOCK_gone]]";
        let first = service.render(&ctx(), content, &PageMeta::default()).await.unwrap();
        let second = service.render(&ctx(), content, &PageMeta::default()).await.unwrap();

        assert_eq!(first, "<nav/><nav/>");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_block_store_error_isolated_to_token() {
        let mut store = MockStore::new();
        store
            .expect_block_find_by_id()
            .times(1)
            .returning(|_, _| Err(AppError::store("timeout", json!({}))));

        let service = service(store);

        let out = service
            .render(&ctx(), "a[[BLOCK_x]]b", &PageMeta::default())
            .await
            .unwrap();

        assert_eq!(out, "ab");
    }

    #[tokio::test]
    async fn test_block_content_is_not_reexpanded() {
        let mut store = MockStore::new();
        store
            .expect_block_find_by_id()
            .withf(|_, id| id == "outer")
            .returning(|_, _| Ok(Some(Block::new("outer", "[[BLOCK_inner]]"))));

        let service = service(store);

        let out = service
            .render(&ctx(), "[[BLOCK_outer]]", &PageMeta::default())
            .await
            .unwrap();

        assert_eq!(out, "[[BLOCK_inner]]");
    }

    #[tokio::test]
    async fn test_shortcodes_paired_and_unpaired() {
        let service = service(MockStore::new()).with_shortcodes(vec![
            Arc::new(Year) as Arc<dyn Shortcode>,
            Arc::new(Shout),
        ]);

        let out = service
            .render(
                &ctx(),
                r#"(c) <year> <year/> <shout mark="?">hi</shout> <shout>yo</shout> <yearly>"#,
                &PageMeta::default(),
            )
            .await
            .unwrap();

        assert_eq!(out, "(c) 2024 2024 HI? YO! <yearly>");
    }

    #[tokio::test]
    async fn test_shortcodes_run_in_registration_order() {
        struct EmitsYear;

        #[async_trait]
        impl Shortcode for EmitsYear {
            fn alias(&self) -> &str {
                "emit"
            }

            async fn render(
                &self,
                _ctx: &RequestContext,
                _content: &str,
                _attrs: &BTreeMap<String, String>,
            ) -> Result<String, AppError> {
                Ok("<year>".to_string())
            }
        }

        let service = service(MockStore::new()).with_shortcodes(vec![
            Arc::new(EmitsYear) as Arc<dyn Shortcode>,
            Arc::new(Year),
        ]);

        let out = service.render(&ctx(), "<emit>", &PageMeta::default()).await.unwrap();

        assert_eq!(out, "2024");
    }

    #[tokio::test]
    async fn test_shortcode_error_aborts_render() {
        let broken: Arc<dyn Shortcode> = Arc::new(Broken);
        let service = service(MockStore::new()).with_shortcodes(vec![broken]);

        let result = service.render(&ctx(), "x <broken> y", &PageMeta::default()).await;

        assert!(matches!(result, Err(AppError::Render { .. })));
    }

    #[tokio::test]
    async fn test_translations_left_verbatim_without_backend() {
        let service = service(MockStore::new());

        let out = service
            .render(&ctx(), "[[TRANSLATION_hello]]", &PageMeta::default())
            .await
            .unwrap();

        assert_eq!(out, "[[TRANSLATION_hello]]");
    }

    #[tokio::test]
    async fn test_translations_use_language_with_fallback() {
        let mut translations = MockTranslationStore::new();
        translations
            .expect_translation_find_by_handle_or_id()
            .withf(|_, key| key == "hello")
            .times(1)
            .returning(|_, _| {
                Ok(Some(
                    Translation::new("t1", "hello")
                        .with_text("en", "Hello")
                        .with_text("de", "Hallo"),
                ))
            });
        translations
            .expect_translation_find_by_handle_or_id()
            .withf(|_, key| key == "missing")
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(MockStore::new()).with_translations(Arc::new(translations));

        let content = "[[TRANSLATION_hello]]/[[TRANSLATION_missing]]";
        let de = service
            .render(&ctx(), content, &PageMeta::default().with_language("de"))
            .await
            .unwrap();
        let fr = service
            .render(&ctx(), content, &PageMeta::default().with_language("fr"))
            .await
            .unwrap();
        let unset = service.render(&ctx(), content, &PageMeta::default()).await.unwrap();

        assert_eq!(de, "Hallo/");
        assert_eq!(fr, "Hello/");
        assert_eq!(unset, "Hello/");
    }

    #[tokio::test]
    async fn test_cancelled_request_aborts_pipeline() {
        let mut store = MockStore::new();
        store.expect_block_find_by_id().returning(|_, _| Ok(None));

        let service = service(store);
        let ctx = ctx();
        ctx.cancellation_token().cancel();

        let result = service.render(&ctx, "[[BLOCK_1]]", &PageMeta::default()).await;

        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[test]
    fn test_block_json_malformed() {
        let out = convert_block_json_to_html(Some(&ListRenderer), "{not json");
        assert_eq!(out, MALFORMED_BLOCK_CONTENT);
    }

    #[test]
    fn test_block_json_wrong_shape() {
        let out = convert_block_json_to_html(Some(&ListRenderer), r#"{"type":"p"}"#);
        assert_eq!(out, BLOCK_CONTENT_PARSE_ERROR);
    }

    #[test]
    fn test_block_json_without_renderer() {
        let out = convert_block_json_to_html(None, "[]");
        assert_eq!(out, BLOCK_EDITOR_NOT_CONFIGURED);
    }

    #[test]
    fn test_block_json_rendered() {
        let json = r#"[{"type":"p"},{"type":"hr"}]"#;
        let out = convert_block_json_to_html(Some(&ListRenderer), json);
        assert_eq!(out, "<p></p><hr></hr>");
    }
}
