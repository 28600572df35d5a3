//! Application layer: resolving requests and rendering content.
//!
//! Services consume the domain's collaborator traits and read through the
//! shared cache. [`services::FrontendService`] is the single entry point the
//! HTTP boundary and the CLI talk to.
//!
//! # Available Services
//!
//! - [`services::SiteService`] - `(domain, path)` to site and endpoint
//! - [`services::PageService`] - `(site, alias)` to page, including patterns
//! - [`services::RenderService`] - placeholder, block, shortcode and translation stages
//! - [`services::MiddlewareRegistry`] - named post-render HTML transforms
//! - [`services::FrontendService`] - orchestrates all of the above

pub mod services;
