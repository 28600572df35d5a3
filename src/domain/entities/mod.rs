//! Core CMS entities read by the resolvers and the content pipeline.
//!
//! Entities are immutable snapshots handed out by the Store collaborator and
//! shared through the cache; the frontend never mutates them.
//!
//! # Entity Types
//!
//! - [`Site`] - A tenant, addressed by one or more endpoints
//! - [`Page`] - A routable page inside a site
//! - [`Template`] - Wrapping markup containing `[[PageContent]]`
//! - [`Block`] - Reusable content fragment referenced as `[[BLOCK_<id>]]`
//! - [`Translation`] - Localized text referenced as `[[TRANSLATION_<id>]]`

pub mod block;
pub mod page;
pub mod site;
pub mod status;
pub mod template;
pub mod translation;

pub use block::Block;
pub use page::{Page, PageEditor};
pub use site::Site;
pub use status::Status;
pub use template::Template;
pub use translation::Translation;
