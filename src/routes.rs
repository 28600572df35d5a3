//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET /__health` - Store and cache health (JSON)
//! - everything else - rendered by the CMS frontend for `(Host, path)`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use axum::Router;
use axum::routing::get;

use crate::api::handlers::{frontend_handler, health_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Path of the health endpoint; not routable as a CMS page.
pub const HEALTH_PATH: &str = "/__health";

/// Constructs the application router.
///
/// Every request that is not the health check falls through to the page
/// renderer, whatever its method or path.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .fallback(frontend_handler)
        .with_state(state)
        .layer(tracing::layer())
}
