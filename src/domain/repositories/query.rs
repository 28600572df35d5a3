//! Query filters accepted by the [`super::Store`] list operations.
//!
//! Filters are plain data; the persistence layer translates them into SQL.
//! [`SiteQuery::validate`] and [`PageQuery::validate`] reject inputs that would
//! otherwise produce invalid or unsafe statements (unknown column names are
//! never interpolated).

use serde_json::json;

use crate::domain::entities::Status;
use crate::error::AppError;

pub const COLUMN_ALIAS: &str = "alias";
pub const COLUMN_CANONICAL_URL: &str = "canonical_url";
pub const COLUMN_CONTENT: &str = "content";
pub const COLUMN_CREATED_AT: &str = "created_at";
pub const COLUMN_DOMAIN_NAMES: &str = "domain_names";
pub const COLUMN_EDITOR: &str = "editor";
pub const COLUMN_ID: &str = "id";
pub const COLUMN_META_DESCRIPTION: &str = "meta_description";
pub const COLUMN_META_KEYWORDS: &str = "meta_keywords";
pub const COLUMN_META_ROBOTS: &str = "meta_robots";
pub const COLUMN_MIDDLEWARES_AFTER: &str = "middlewares_after";
pub const COLUMN_MIDDLEWARES_BEFORE: &str = "middlewares_before";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_SITE_ID: &str = "site_id";
pub const COLUMN_SOFT_DELETED_AT: &str = "soft_deleted_at";
pub const COLUMN_STATUS: &str = "status";
pub const COLUMN_TEMPLATE_ID: &str = "template_id";
pub const COLUMN_TITLE: &str = "title";
pub const COLUMN_UPDATED_AT: &str = "updated_at";

pub const SITE_COLUMNS: &[&str] = &[
    COLUMN_ID,
    COLUMN_NAME,
    COLUMN_DOMAIN_NAMES,
    COLUMN_STATUS,
    COLUMN_CREATED_AT,
    COLUMN_UPDATED_AT,
    COLUMN_SOFT_DELETED_AT,
];

pub const PAGE_COLUMNS: &[&str] = &[
    COLUMN_ID,
    COLUMN_SITE_ID,
    COLUMN_ALIAS,
    COLUMN_NAME,
    COLUMN_CONTENT,
    COLUMN_EDITOR,
    COLUMN_TEMPLATE_ID,
    COLUMN_CANONICAL_URL,
    COLUMN_META_DESCRIPTION,
    COLUMN_META_KEYWORDS,
    COLUMN_META_ROBOTS,
    COLUMN_TITLE,
    COLUMN_MIDDLEWARES_BEFORE,
    COLUMN_MIDDLEWARES_AFTER,
    COLUMN_STATUS,
    COLUMN_CREATED_AT,
    COLUMN_UPDATED_AT,
    COLUMN_SOFT_DELETED_AT,
];

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter for [`super::Store::site_list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteQuery {
    pub id: Option<String>,
    pub id_in: Option<Vec<String>>,
    pub name_like: Option<String>,
    pub status: Option<Status>,
    pub status_in: Option<Vec<Status>>,
    pub soft_deleted_included: bool,
    /// Column projection; empty selects every column.
    pub columns: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_by: Option<String>,
    pub sort_order: SortOrder,
}

impl SiteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id_in(mut self, ids: Vec<String>) -> Self {
        self.id_in = Some(ids);
        self
    }

    pub fn name_like(mut self, name: impl Into<String>) -> Self {
        self.name_like = Some(name.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status_in(mut self, statuses: Vec<Status>) -> Self {
        self.status_in = Some(statuses);
        self
    }

    pub fn soft_deleted_included(mut self, included: bool) -> Self {
        self.soft_deleted_included = included;
        self
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(column.into());
        self.sort_order = order;
        self
    }

    /// Validates the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown columns, an unknown
    /// order-by column or an empty id/status list.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_common(
            &self.columns,
            self.order_by.as_deref(),
            self.id_in.as_deref(),
            self.status_in.as_deref(),
            SITE_COLUMNS,
        )
    }
}

/// Filter for [`super::Store::page_list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    pub id: Option<String>,
    pub id_in: Option<Vec<String>>,
    pub site_id: Option<String>,
    pub alias: Option<String>,
    pub alias_like: Option<String>,
    pub template_id: Option<String>,
    pub status: Option<Status>,
    pub status_in: Option<Vec<Status>>,
    pub soft_deleted_included: bool,
    pub columns: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_by: Option<String>,
    pub sort_order: SortOrder,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id_in(mut self, ids: Vec<String>) -> Self {
        self.id_in = Some(ids);
        self
    }

    pub fn site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn alias_like(mut self, alias: impl Into<String>) -> Self {
        self.alias_like = Some(alias.into());
        self
    }

    pub fn template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status_in(mut self, statuses: Vec<Status>) -> Self {
        self.status_in = Some(statuses);
        self
    }

    pub fn soft_deleted_included(mut self, included: bool) -> Self {
        self.soft_deleted_included = included;
        self
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(column.into());
        self.sort_order = order;
        self
    }

    /// Validates the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown columns, an unknown
    /// order-by column or an empty id/status list.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_common(
            &self.columns,
            self.order_by.as_deref(),
            self.id_in.as_deref(),
            self.status_in.as_deref(),
            PAGE_COLUMNS,
        )
    }
}

fn validate_common(
    columns: &[String],
    order_by: Option<&str>,
    id_in: Option<&[String]>,
    status_in: Option<&[Status]>,
    allowed: &[&str],
) -> Result<(), AppError> {
    if let Some(unknown) = columns.iter().find(|c| !allowed.contains(&c.as_str())) {
        return Err(AppError::validation(
            "Unknown column",
            json!({ "column": unknown }),
        ));
    }

    if let Some(column) = order_by
        && !allowed.contains(&column)
    {
        return Err(AppError::validation(
            "Unknown order by column",
            json!({ "column": column }),
        ));
    }

    if id_in.is_some_and(|ids| ids.is_empty()) {
        return Err(AppError::validation("id list cannot be empty", json!({})));
    }

    if status_in.is_some_and(|statuses| statuses.is_empty()) {
        return Err(AppError::validation(
            "status list cannot be empty",
            json!({}),
        ));
    }

    Ok(())
}
