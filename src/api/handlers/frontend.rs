//! Catch-all handler rendering CMS pages.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Uri};
use axum::response::Html;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::services::frontend_service::{ERROR_OCCURRED, domain_not_supported};
use crate::domain::context::RequestContext;
use crate::state::AppState;
use crate::utils::{extract_host, select_language};

/// Renders whatever page `(Host, path)` resolves to.
///
/// # Endpoint
///
/// `GET /*` (router fallback)
///
/// # Query Parameters
///
/// - `lang` - Preferred language; falls back to `Accept-Language`, then
///   to the configured default
///
/// # Response Codes
///
/// - **200 OK**: Always. Not-found, unsupported domain and internal failures
///   are rendered as HTML messages in the body.
///
/// # Cancellation
///
/// The request context carries a cancellation token that fires when the
/// render deadline passes or the client goes away (the handler future is
/// dropped), so pending Store calls stop early.
pub async fn frontend_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    uri: Uri,
) -> Html<String> {
    let host = match extract_host(&headers, &uri) {
        Ok(host) => host,
        Err(e) => {
            warn!(error = %e, path = uri.path(), "Request without usable host");
            return Html(domain_not_supported(""));
        }
    };

    let language = select_language(
        params.get("lang").map(String::as_str),
        &headers,
        &state.languages,
        &state.default_language,
    );

    let token = CancellationToken::new();
    let _cancel_on_drop = token.clone().drop_guard();

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let ctx = RequestContext::new(host, uri.path())
        .with_uri(path_and_query)
        .with_headers(headers)
        .with_language(language)
        .with_cancellation(token.clone());

    debug!(host = ctx.host(), path = ctx.path(), lang = ctx.language(), "Rendering");

    match tokio::time::timeout(
        state.render_timeout,
        state.frontend.render_by_host_and_path(&ctx),
    )
    .await
    {
        Ok(html) => Html(html),
        Err(_) => {
            token.cancel();
            warn!(
                host = ctx.host(),
                path = ctx.path(),
                timeout_ms = state.render_timeout.as_millis() as u64,
                "Render timed out"
            );
            metrics::counter!("cms_render_total", "outcome" => "timeout").increment(1);
            Html(ERROR_OCCURRED.to_string())
        }
    }
}
