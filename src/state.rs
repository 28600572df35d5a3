//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::FrontendService;
use crate::application::services::render_service::DEFAULT_LANGUAGE;

/// Default per-request render deadline.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Handler state: the render orchestrator plus request-boundary settings.
///
/// Cheap to clone; everything is behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub frontend: Arc<FrontendService>,
    pub render_timeout: Duration,
    /// Languages accepted from the request, default first.
    pub languages: Arc<[String]>,
    pub default_language: Arc<str>,
}

impl AppState {
    pub fn new(frontend: Arc<FrontendService>) -> Self {
        Self {
            frontend,
            render_timeout: DEFAULT_RENDER_TIMEOUT,
            languages: Arc::from(vec![DEFAULT_LANGUAGE.to_string()]),
            default_language: Arc::from(DEFAULT_LANGUAGE),
        }
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>, default_language: &str) -> Self {
        self.languages = Arc::from(languages);
        self.default_language = Arc::from(default_language);
        self
    }
}
