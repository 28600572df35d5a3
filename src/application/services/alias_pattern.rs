//! Pattern aliases such as `/user/:num` and their matching precedence.
//!
//! A page alias containing `:` is treated as a pattern. Recognised tokens are
//! replaced by regex fragments; everything else is matched literally. When
//! several patterns of one site match the same request alias, the most
//! specific one wins:
//!
//! 1. longer literal prefix (text before the first token)
//! 2. more literal characters overall
//! 3. alias, lexicographically
//! 4. page id, lexicographically

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// Supported tokens, longest first so `:number` is never read as `:num` + `ber`.
pub const PATTERN_TOKENS: &[(&str, &str)] = &[
    (":numeric", "([0-9-.]+)"),
    (":number", "([0-9]+)"),
    (":string", "([a-zA-Z]+)"),
    (":alpha", "([a-zA-Z0-9-_]+)"),
    (":any", "([^/]+)"),
    (":all", "(.*)"),
    (":num", "([0-9]+)"),
];

/// A compiled page alias pattern, cacheable per site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasPattern {
    pub page_id: String,
    pub alias: String,
    /// Anchored regex source (`^...$`).
    pub regex: String,
    pub literal_prefix_len: usize,
    pub literal_len: usize,
}

impl AliasPattern {
    /// Compiles `alias` into a pattern, or `None` if it has no `:` at all.
    pub fn compile(page_id: impl Into<String>, alias: impl Into<String>) -> Option<Self> {
        let alias = alias.into();
        if !alias.contains(':') {
            return None;
        }

        let mut regex = String::with_capacity(alias.len() * 2 + 2);
        regex.push('^');

        let mut literal_len = 0;
        let mut literal_prefix_len = None;
        let mut rest = alias.as_str();

        while let Some(c) = rest.chars().next() {
            let token = PATTERN_TOKENS
                .iter()
                .find(|(token, _)| rest.starts_with(token));

            if let Some((token, fragment)) = token {
                literal_prefix_len.get_or_insert(literal_len);
                regex.push_str(fragment);
                rest = &rest[token.len()..];
            } else {
                let mut buf = [0u8; 4];
                regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                literal_len += 1;
                rest = &rest[c.len_utf8()..];
            }
        }

        regex.push('$');

        Some(Self {
            page_id: page_id.into(),
            literal_prefix_len: literal_prefix_len.unwrap_or(literal_len),
            literal_len,
            alias,
            regex,
        })
    }

    /// Builds the regex. Returns `None` (and logs) if it does not compile.
    pub fn to_regex(&self) -> Option<Regex> {
        match Regex::new(&self.regex) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(
                    page_id = %self.page_id,
                    alias = %self.alias,
                    error = %e,
                    "Skipping alias pattern that does not compile"
                );
                None
            }
        }
    }

    fn precedence(&self, other: &Self) -> Ordering {
        other
            .literal_prefix_len
            .cmp(&self.literal_prefix_len)
            .then_with(|| other.literal_len.cmp(&self.literal_len))
            .then_with(|| self.alias.cmp(&other.alias))
            .then_with(|| self.page_id.cmp(&other.page_id))
    }
}

/// Compiles `(page_id, alias)` pairs and sorts them by matching precedence.
///
/// Literal aliases are dropped; they are served by exact lookup.
pub fn build_patterns<I, S>(aliases: I) -> Vec<AliasPattern>
where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
{
    let mut patterns: Vec<AliasPattern> = aliases
        .into_iter()
        .filter_map(|(page_id, alias)| AliasPattern::compile(page_id, alias))
        .collect();

    patterns.sort_by(AliasPattern::precedence);
    patterns
}
