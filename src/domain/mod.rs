//! Domain layer containing CMS entities and collaborator contracts.
//!
//! The domain layer has no dependencies on infrastructure. It defines what the
//! frontend reads ([`entities`]), where it reads it from ([`repositories`]),
//! the per-request [`context`] and the [`extensions`] an embedding application
//! plugs in.
//!
//! # Request Flow
//!
//! 1. HTTP boundary builds a [`context::RequestContext`] from `(host, path)`
//! 2. The site resolver picks the tenant whose endpoint prefixes `host + path`
//! 3. The page resolver maps the remaining alias to a page
//! 4. The content pipeline renders page (or template) content
//! 5. The page's middlewares transform the final HTML

pub mod context;
pub mod entities;
pub mod extensions;
pub mod repositories;
