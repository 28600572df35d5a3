//! Collaborator trait definitions for the domain layer.
//!
//! The frontend only ever reads CMS entities. All reads go through the
//! [`Store`] trait (and the optional [`TranslationStore`]); implementations
//! live in `crate::infrastructure::persistence`.
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` for unit tests. The
//! integration tests in `tests/` use an in-memory fake instead.

pub mod query;
pub mod store;
pub mod translation_store;

pub use query::{PageQuery, SiteQuery, SortOrder};
pub use store::Store;
pub use translation_store::TranslationStore;

#[cfg(test)]
pub use store::MockStore;
#[cfg(test)]
pub use translation_store::MockTranslationStore;
