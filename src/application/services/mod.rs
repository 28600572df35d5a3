//! Request resolution and rendering services.

pub mod alias_pattern;
pub mod cached;
pub mod frontend_service;
pub mod middleware_registry;
pub mod page_service;
pub mod render_service;
pub mod site_service;

pub use alias_pattern::AliasPattern;
pub use cached::{CachePolicy, CacheValue, Cached, FrontendCache, SiteEndpoint};
pub use frontend_service::FrontendService;
pub use middleware_registry::MiddlewareRegistry;
pub use page_service::PageService;
pub use render_service::{PageMeta, RenderService};
pub use site_service::SiteService;
