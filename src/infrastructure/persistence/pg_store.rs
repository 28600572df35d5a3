//! PostgreSQL implementation of the Store and TranslationStore collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use crate::domain::context::RequestContext;
use crate::domain::entities::{Block, Page, PageEditor, Site, Status, Template, Translation};
use crate::domain::repositories::query::{PAGE_COLUMNS, SITE_COLUMNS};
use crate::domain::repositories::{PageQuery, SiteQuery, Store, TranslationStore};
use crate::error::AppError;

pub const TABLE_SITE: &str = "cms_site";
pub const TABLE_PAGE: &str = "cms_page";
pub const TABLE_BLOCK: &str = "cms_block";
pub const TABLE_TEMPLATE: &str = "cms_template";
pub const TABLE_TRANSLATION: &str = "cms_translation";

/// PostgreSQL-backed Store.
///
/// List filters are turned into parameterised SQL with [`QueryBuilder`];
/// only validated column names are ever interpolated. List-valued columns
/// (`domain_names`, page middlewares) and translation content are stored as
/// JSON text.
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }
}

#[derive(sqlx::FromRow, Default)]
#[sqlx(default)]
struct SiteRow {
    id: String,
    name: String,
    domain_names: String,
    status: String,
    soft_deleted_at: Option<DateTime<Utc>>,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Self {
            domain_names: decode_list(&row.domain_names, "domain_names", &row.id),
            status: decode_status(&row.status, &row.id),
            id: row.id,
            name: row.name,
            soft_deleted_at: row.soft_deleted_at,
        }
    }
}

#[derive(sqlx::FromRow, Default)]
#[sqlx(default)]
struct PageRow {
    id: String,
    site_id: String,
    alias: String,
    name: String,
    content: String,
    editor: String,
    template_id: Option<String>,
    canonical_url: String,
    meta_description: String,
    meta_keywords: String,
    meta_robots: String,
    title: String,
    middlewares_before: String,
    middlewares_after: String,
    status: String,
    soft_deleted_at: Option<DateTime<Utc>>,
}

impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        let editor = row.editor.parse::<PageEditor>().unwrap_or_else(|e| {
            warn!(page_id = %row.id, error = %e, "Unknown page editor, using textarea");
            PageEditor::default()
        });

        Self {
            editor,
            middlewares_before: decode_list(&row.middlewares_before, "middlewares_before", &row.id),
            middlewares_after: decode_list(&row.middlewares_after, "middlewares_after", &row.id),
            status: decode_status(&row.status, &row.id),
            id: row.id,
            site_id: row.site_id,
            alias: row.alias,
            name: row.name,
            content: row.content,
            template_id: row.template_id,
            canonical_url: row.canonical_url,
            meta_description: row.meta_description,
            meta_keywords: row.meta_keywords,
            meta_robots: row.meta_robots,
            title: row.title,
            soft_deleted_at: row.soft_deleted_at,
        }
    }
}

/// Shared shape of `cms_block` and `cms_template`.
#[derive(sqlx::FromRow)]
struct ContentRow {
    id: String,
    name: String,
    content: String,
    status: String,
}

impl From<ContentRow> for Block {
    fn from(row: ContentRow) -> Self {
        Self {
            status: decode_status(&row.status, &row.id),
            id: row.id,
            name: row.name,
            content: row.content,
        }
    }
}

impl From<ContentRow> for Template {
    fn from(row: ContentRow) -> Self {
        Self {
            status: decode_status(&row.status, &row.id),
            id: row.id,
            name: row.name,
            content: row.content,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TranslationRow {
    id: String,
    handle: String,
    content: String,
    status: String,
}

impl From<TranslationRow> for Translation {
    fn from(row: TranslationRow) -> Self {
        let content = if row.content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&row.content).unwrap_or_else(|e| {
                warn!(translation_id = %row.id, error = %e, "Translation content is not a JSON object");
                BTreeMap::new()
            })
        };

        Self {
            status: decode_status(&row.status, &row.id),
            id: row.id,
            handle: row.handle,
            content,
        }
    }
}

/// Decodes a JSON array of strings. Empty text is an empty list; a decode
/// failure is logged and also yields an empty list.
fn decode_list(raw: &str, field: &'static str, id: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(id, field, error = %e, "Column is not a JSON string list");
        Vec::new()
    })
}

fn decode_status(raw: &str, id: &str) -> Status {
    if raw.is_empty() {
        return Status::default();
    }

    raw.parse().unwrap_or_else(|e| {
        warn!(id, error = %e, "Unknown status, treating as draft");
        Status::default()
    })
}

fn push_projection(qb: &mut QueryBuilder<'static, Postgres>, columns: &[String], all: &[&str]) {
    if columns.is_empty() {
        qb.push(all.join(", "));
    } else {
        qb.push(columns.join(", "));
    }
}

fn push_status_filters(
    qb: &mut QueryBuilder<'static, Postgres>,
    status: Option<Status>,
    status_in: Option<&[Status]>,
    soft_deleted_included: bool,
) {
    if let Some(status) = status {
        qb.push(" AND status = ");
        qb.push_bind(status.as_str().to_string());
    }

    if let Some(statuses) = status_in {
        qb.push(" AND status = ANY(");
        qb.push_bind(
            statuses
                .iter()
                .map(|s| s.as_str().to_string())
                .collect::<Vec<_>>(),
        );
        qb.push(")");
    }

    if !soft_deleted_included {
        qb.push(" AND soft_deleted_at IS NULL");
    }
}

fn push_paging(
    qb: &mut QueryBuilder<'static, Postgres>,
    order_by: Option<&str>,
    sort_order: &str,
    limit: Option<u32>,
    offset: Option<u32>,
) {
    if let Some(column) = order_by {
        qb.push(format!(" ORDER BY {} {}", column, sort_order));
    }

    if let Some(limit) = limit {
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(limit));
    }

    if let Some(offset) = offset {
        qb.push(" OFFSET ");
        qb.push_bind(i64::from(offset));
    }
}

/// Builds the `SELECT` for a validated [`SiteQuery`].
fn site_select(query: &SiteQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    push_projection(&mut qb, &query.columns, SITE_COLUMNS);
    qb.push(format!(" FROM {} WHERE 1=1", TABLE_SITE));

    if let Some(id) = &query.id {
        qb.push(" AND id = ");
        qb.push_bind(id.clone());
    }

    if let Some(ids) = &query.id_in {
        qb.push(" AND id = ANY(");
        qb.push_bind(ids.clone());
        qb.push(")");
    }

    if let Some(name) = &query.name_like {
        qb.push(" AND name ILIKE ");
        qb.push_bind(format!("%{}%", name));
    }

    push_status_filters(
        &mut qb,
        query.status,
        query.status_in.as_deref(),
        query.soft_deleted_included,
    );
    push_paging(
        &mut qb,
        query.order_by.as_deref(),
        query.sort_order.as_sql(),
        query.limit,
        query.offset,
    );

    qb
}

/// Builds the `SELECT` for a validated [`PageQuery`].
fn page_select(query: &PageQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    push_projection(&mut qb, &query.columns, PAGE_COLUMNS);
    qb.push(format!(" FROM {} WHERE 1=1", TABLE_PAGE));

    if let Some(id) = &query.id {
        qb.push(" AND id = ");
        qb.push_bind(id.clone());
    }

    if let Some(ids) = &query.id_in {
        qb.push(" AND id = ANY(");
        qb.push_bind(ids.clone());
        qb.push(")");
    }

    if let Some(site_id) = &query.site_id {
        qb.push(" AND site_id = ");
        qb.push_bind(site_id.clone());
    }

    if let Some(alias) = &query.alias {
        qb.push(" AND alias = ");
        qb.push_bind(alias.clone());
    }

    if let Some(alias) = &query.alias_like {
        qb.push(" AND alias LIKE ");
        qb.push_bind(format!("%{}%", alias));
    }

    if let Some(template_id) = &query.template_id {
        qb.push(" AND template_id = ");
        qb.push_bind(template_id.clone());
    }

    push_status_filters(
        &mut qb,
        query.status,
        query.status_in.as_deref(),
        query.soft_deleted_included,
    );
    push_paging(
        &mut qb,
        query.order_by.as_deref(),
        query.sort_order.as_sql(),
        query.limit,
        query.offset,
    );

    qb
}

fn content_by_id(table: &str) -> String {
    format!(
        "SELECT id, name, content, status FROM {} WHERE id = $1 AND soft_deleted_at IS NULL",
        table
    )
}

fn translation_by_handle_or_id() -> String {
    format!(
        "SELECT id, handle, content, status FROM {} \
         WHERE (id = $1 OR handle = $1) AND soft_deleted_at IS NULL \
         ORDER BY (id = $1) DESC LIMIT 1",
        TABLE_TRANSLATION
    )
}

fn ensure_live(ctx: &RequestContext) -> Result<(), AppError> {
    if ctx.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl Store for PgStore {
    async fn site_list(
        &self,
        ctx: &RequestContext,
        query: SiteQuery,
    ) -> Result<Vec<Site>, AppError> {
        ensure_live(ctx)?;
        query.validate()?;

        let rows: Vec<SiteRow> = site_select(&query)
            .build_query_as()
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().map(Site::from).collect())
    }

    async fn site_find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Site>, AppError> {
        if id.is_empty() {
            return Err(AppError::validation("site id is empty", json!({})));
        }

        let sites = self.site_list(ctx, SiteQuery::new().id(id).limit(1)).await?;
        Ok(sites.into_iter().next())
    }

    async fn page_list(
        &self,
        ctx: &RequestContext,
        query: PageQuery,
    ) -> Result<Vec<Page>, AppError> {
        ensure_live(ctx)?;
        query.validate()?;

        let rows: Vec<PageRow> = page_select(&query)
            .build_query_as()
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().map(Page::from).collect())
    }

    async fn page_find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Page>, AppError> {
        if id.is_empty() {
            return Err(AppError::validation("page id is empty", json!({})));
        }

        let pages = self.page_list(ctx, PageQuery::new().id(id).limit(1)).await?;
        Ok(pages.into_iter().next())
    }

    async fn block_find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Block>, AppError> {
        ensure_live(ctx)?;

        let row = sqlx::query_as::<_, ContentRow>(&content_by_id(TABLE_BLOCK))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(Block::from))
    }

    async fn template_find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Template>, AppError> {
        ensure_live(ctx)?;

        let row = sqlx::query_as::<_, ContentRow>(&content_by_id(TABLE_TEMPLATE))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(Template::from))
    }

    async fn ping(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool()).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database ping failed");
                false
            }
        }
    }
}

#[async_trait]
impl TranslationStore for PgStore {
    async fn translation_find_by_handle_or_id(
        &self,
        ctx: &RequestContext,
        key: &str,
    ) -> Result<Option<Translation>, AppError> {
        ensure_live(ctx)?;

        let row = sqlx::query_as::<_, TranslationRow>(&translation_by_handle_or_id())
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(Translation::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::SortOrder;
    use crate::domain::repositories::query::{COLUMN_ALIAS, COLUMN_ID, COLUMN_NAME};

    #[test]
    fn test_site_select_active_projection() {
        let query = SiteQuery::new()
            .status(Status::Active)
            .columns(&[COLUMN_ID, "domain_names"]);

        let qb = site_select(&query);

        assert_eq!(
            qb.sql(),
            "SELECT id, domain_names FROM cms_site WHERE 1=1 AND status = $1 \
             AND soft_deleted_at IS NULL"
        );
    }

    #[test]
    fn test_site_select_all_columns_with_paging() {
        let query = SiteQuery::new()
            .name_like("shop")
            .soft_deleted_included(true)
            .order_by(COLUMN_NAME, SortOrder::Desc)
            .limit(10)
            .offset(20);

        let sql = site_select(&query).sql().to_string();

        assert!(sql.starts_with("SELECT id, name, domain_names, status,"));
        assert!(sql.contains("AND name ILIKE $1"));
        assert!(!sql.contains("soft_deleted_at IS NULL"));
        assert!(sql.ends_with("ORDER BY name DESC LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_page_select_by_site_and_alias() {
        let query = PageQuery::new()
            .site_id("s1")
            .alias("/about")
            .status(Status::Active)
            .limit(1);

        let qb = page_select(&query);

        assert_eq!(
            qb.sql(),
            format!(
                "SELECT {} FROM cms_page WHERE 1=1 AND site_id = $1 AND alias = $2 \
                 AND status = $3 AND soft_deleted_at IS NULL LIMIT $4",
                PAGE_COLUMNS.join(", ")
            )
        );
    }

    #[test]
    fn test_page_select_id_list_and_status_list() {
        let query = PageQuery::new()
            .id_in(vec!["a".into(), "b".into()])
            .status_in(vec![Status::Active, Status::Draft])
            .columns(&[COLUMN_ID, COLUMN_ALIAS]);

        let qb = page_select(&query);

        assert_eq!(
            qb.sql(),
            "SELECT id, alias FROM cms_page WHERE 1=1 AND id = ANY($1) \
             AND status = ANY($2) AND soft_deleted_at IS NULL"
        );
    }

    #[test]
    fn test_content_by_id_sql() {
        assert_eq!(
            content_by_id(TABLE_BLOCK),
            "SELECT id, name, content, status FROM cms_block WHERE id = $1 AND soft_deleted_at IS NULL"
        );
    }

    #[test]
    fn test_site_row_decodes_domain_names() {
        let site = Site::from(SiteRow {
            id: "s1".into(),
            domain_names: r#"["example.com","example.com/blog"]"#.into(),
            status: "active".into(),
            ..SiteRow::default()
        });

        assert_eq!(site.domain_names, vec!["example.com", "example.com/blog"]);
        assert!(site.is_active());
    }

    #[test]
    fn test_bad_json_list_yields_empty() {
        let site = Site::from(SiteRow {
            id: "s1".into(),
            domain_names: "example.com".into(),
            status: "active".into(),
            ..SiteRow::default()
        });

        assert!(site.domain_names.is_empty());
    }

    #[test]
    fn test_page_row_defaults() {
        let page = Page::from(PageRow {
            id: "p1".into(),
            alias: "/user/:num".into(),
            editor: "blockeditor".into(),
            middlewares_after: r#"["footer"]"#.into(),
            ..PageRow::default()
        });

        assert_eq!(page.editor, PageEditor::BlockEditor);
        assert_eq!(page.status, Status::Draft);
        assert!(page.middlewares_before.is_empty());
        assert_eq!(page.middlewares_after, vec!["footer"]);
    }

    #[test]
    fn test_translation_row_content() {
        let translation = Translation::from(TranslationRow {
            id: "t1".into(),
            handle: "greeting".into(),
            content: r#"{"en":"Hello","de":"Hallo"}"#.into(),
            status: "active".into(),
        });

        assert_eq!(translation.text_for("de", "en"), Some("Hallo"));
    }
}
