//! Per-request context threaded through every Store call and shortcode.

use axum::http::HeaderMap;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;

/// Request-scoped data shared by resolvers, pipeline stages and extensions.
///
/// Carries the inbound `(host, path)`, the raw URI and headers (for shortcodes
/// and middlewares that inspect the request), the resolved language and a
/// cancellation token. Once the token fires, every call wrapped with
/// [`RequestContext::guard`] returns [`AppError::Cancelled`] instead of
/// finishing a stale render.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    host: String,
    path: String,
    uri: String,
    headers: HeaderMap,
    language: String,
    cancel: CancellationToken,
}

impl RequestContext {
    /// Creates a context for `host + path` with an empty header map.
    ///
    /// The URI defaults to `path`; use [`RequestContext::with_uri`] when the
    /// request carried a query string.
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            host: host.into(),
            uri: path.clone(),
            path,
            ..Self::default()
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path plus query string, as received.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Requested language; empty when the caller did not set one.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs `fut` unless the request is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cancelled`] if the token fires before `fut`
    /// completes, otherwise whatever `fut` returns.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AppError::Cancelled),
            result = fut => result,
        }
    }
}
