//! Translation entity: localized text keyed by language code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Status;

/// Localized text referenced as `[[TRANSLATION_<id or handle>]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub id: String,
    pub handle: String,
    /// Language code (e.g. `en`, `de`) to text.
    pub content: BTreeMap<String, String>,
    pub status: Status,
}

impl Translation {
    pub fn new(id: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: handle.into(),
            content: BTreeMap::new(),
            status: Status::Active,
        }
    }

    pub fn with_text(mut self, language: &str, text: impl Into<String>) -> Self {
        self.content.insert(language.to_string(), text.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Returns the text for `language`, falling back to `default_language`.
    pub fn text_for(&self, language: &str, default_language: &str) -> Option<&str> {
        self.content
            .get(language)
            .or_else(|| self.content.get(default_language))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_for_requested_language() {
        let t = Translation::new("t1", "greeting")
            .with_text("en", "Hello")
            .with_text("de", "Hallo");

        assert_eq!(t.text_for("de", "en"), Some("Hallo"));
    }

    #[test]
    fn test_text_for_falls_back_to_default() {
        let t = Translation::new("t1", "greeting").with_text("en", "Hello");

        assert_eq!(t.text_for("fr", "en"), Some("Hello"));
        assert_eq!(t.text_for("fr", "es"), None);
    }
}
