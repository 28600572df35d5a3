//! Request language selection.

use axum::http::{HeaderMap, header};

/// Picks the render language for a request.
///
/// Priority:
/// 1. `lang` query parameter
/// 2. Primary subtag of the highest-weighted `Accept-Language` entry
///    (`de-CH;q=0.9` counts as `de`)
///
/// A candidate is used only if it is listed in `supported`; otherwise the
/// next source is tried, and `default` is returned when none match.
pub fn select_language(
    query_lang: Option<&str>,
    headers: &HeaderMap,
    supported: &[String],
    default: &str,
) -> String {
    let is_supported = |lang: &str| supported.iter().any(|s| s == lang);

    if let Some(lang) = query_lang.map(normalize)
        && is_supported(&lang)
    {
        return lang;
    }

    let accepted = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default();

    accepted
        .into_iter()
        .find(|lang| is_supported(lang))
        .unwrap_or_else(|| default.to_string())
}

fn normalize(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Parses `Accept-Language` into primary subtags ordered by weight.
fn parse_accept_language(raw: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = raw
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = normalize(parts.next()?);
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let weight = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            (weight > 0.0).then_some((tag, weight))
        })
        .collect();

    // Stable sort keeps header order among equal weights.
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn supported() -> Vec<String> {
        vec!["en".to_string(), "de".to_string(), "fr".to_string()]
    }

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_query_param_wins() {
        let lang = select_language(Some("FR"), &accept("de"), &supported(), "en");
        assert_eq!(lang, "fr");
    }

    #[test]
    fn test_unsupported_query_falls_through_to_header() {
        let lang = select_language(Some("xx"), &accept("de-CH, en;q=0.5"), &supported(), "en");
        assert_eq!(lang, "de");
    }

    #[test]
    fn test_header_weights() {
        let lang = select_language(None, &accept("en;q=0.3, fr;q=0.8, de;q=0.5"), &supported(), "en");
        assert_eq!(lang, "fr");
    }

    #[test]
    fn test_zero_weight_ignored() {
        let lang = select_language(None, &accept("de;q=0, it"), &supported(), "en");
        assert_eq!(lang, "en");
    }

    #[test]
    fn test_default_when_nothing_given() {
        let lang = select_language(None, &HeaderMap::new(), &supported(), "de");
        assert_eq!(lang, "de");
    }
}
