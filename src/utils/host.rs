//! Host extraction from HTTP requests.

use axum::http::{HeaderMap, Uri, header};
use serde_json::json;

use crate::AppError;

/// Extracts the request host used for site matching.
///
/// Reads the `Host` header, falling back to the URI authority (HTTP/2
/// requests carry `:authority` instead). The result is trimmed and
/// lower-cased. The port is kept, because site endpoints are matched
/// verbatim as prefixes of `host + path`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "Example.com:8080".parse().unwrap());
///
/// let host = extract_host(&headers, &Uri::from_static("/")).unwrap();
/// assert_eq!(host, "example.com:8080");
/// ```
pub fn extract_host(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::validation("Invalid Host header", json!({})))?
            .to_string(),
        None => uri
            .authority()
            .map(|authority| authority.as_str().to_string())
            .ok_or_else(|| AppError::validation("Missing Host header", json!({})))?,
    };

    let host = host.trim().to_ascii_lowercase();
    if host.is_empty() {
        return Err(AppError::validation("Empty Host header", json!({})));
    }

    Ok(host)
}
