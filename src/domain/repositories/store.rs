//! The Store collaborator: read access to CMS entities.

use crate::domain::context::RequestContext;
use crate::domain::entities::{Block, Page, Site, Template};
use crate::domain::repositories::query::{PageQuery, SiteQuery};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to sites, pages, blocks and templates.
///
/// Every call receives the request context so implementations can observe
/// cancellation. A missing entity is `Ok(None)`, never an error; errors are
/// reserved for I/O and driver faults. Soft-deleted rows are excluded unless
/// the query explicitly asks for them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Lists sites matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid filter and
    /// [`AppError::Store`] on database errors.
    async fn site_list(&self, ctx: &RequestContext, query: SiteQuery)
    -> Result<Vec<Site>, AppError>;

    /// Finds a site by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn site_find_by_id(&self, ctx: &RequestContext, id: &str)
    -> Result<Option<Site>, AppError>;

    /// Lists pages matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid filter and
    /// [`AppError::Store`] on database errors.
    async fn page_list(&self, ctx: &RequestContext, query: PageQuery)
    -> Result<Vec<Page>, AppError>;

    /// Finds a page by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn page_find_by_id(&self, ctx: &RequestContext, id: &str)
    -> Result<Option<Page>, AppError>;

    /// Finds a block by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn block_find_by_id(&self, ctx: &RequestContext, id: &str)
    -> Result<Option<Block>, AppError>;

    /// Finds a template by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn template_find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Template>, AppError>;

    /// Checks that the backing database is reachable.
    async fn ping(&self) -> bool;
}
