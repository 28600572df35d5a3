//! Named HTML middlewares referenced by pages.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::context::RequestContext;
use crate::domain::extensions::{Middleware, MiddlewareDispatcher};

/// Middlewares keyed by name.
///
/// Registering a second middleware under an existing name replaces the first.
#[derive(Default, Clone)]
pub struct MiddlewareRegistry {
    middlewares: HashMap<String, Arc<dyn Middleware>>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, middleware: Arc<dyn Middleware>) -> Self {
        let name = middleware.name().to_string();
        if self.middlewares.insert(name.clone(), middleware).is_some() {
            warn!(name, "Middleware registered twice; keeping the latest");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Middleware>> {
        self.middlewares.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.middlewares.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

#[async_trait]
impl MiddlewareDispatcher for MiddlewareRegistry {
    /// Runs `before` then `after`, each in list order. Unknown names are skipped.
    async fn apply(
        &self,
        ctx: &RequestContext,
        html: String,
        before: &[String],
        after: &[String],
    ) -> String {
        let mut html = html;

        for name in before.iter().chain(after) {
            let Some(middleware) = self.get(name) else {
                warn!(name = %name, host = ctx.host(), "Unknown middleware, skipping");
                continue;
            };

            debug!(name = %name, "Applying middleware");
            html = middleware.apply(ctx, html).await;
        }

        html
    }
}
