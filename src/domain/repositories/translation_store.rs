//! Optional translation backend consumed by the translation pipeline stage.

use crate::domain::context::RequestContext;
use crate::domain::entities::Translation;
use crate::error::AppError;
use async_trait::async_trait;

/// Looks up translations referenced as `[[TRANSLATION_<key>]]`.
///
/// When no implementation is wired into the frontend, translation tokens are
/// left in the output untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Finds a translation whose id or handle equals `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn translation_find_by_handle_or_id(
        &self,
        ctx: &RequestContext,
        key: &str,
    ) -> Result<Option<Translation>, AppError>;
}
