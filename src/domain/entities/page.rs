//! Page entity: a routable document inside a site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Status;

/// Editor used to author a page; decides how `content` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageEditor {
    BlockArea,
    /// Content is serialized block-editor JSON, converted to HTML before rendering.
    BlockEditor,
    CodeMirror,
    HtmlArea,
    Markdown,
    #[default]
    TextArea,
}

impl PageEditor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageEditor::BlockArea => "blockarea",
            PageEditor::BlockEditor => "blockeditor",
            PageEditor::CodeMirror => "codemirror",
            PageEditor::HtmlArea => "htmlarea",
            PageEditor::Markdown => "markdown",
            PageEditor::TextArea => "textarea",
        }
    }
}

impl fmt::Display for PageEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageEditor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blockarea" => Ok(PageEditor::BlockArea),
            "blockeditor" => Ok(PageEditor::BlockEditor),
            "codemirror" => Ok(PageEditor::CodeMirror),
            "htmlarea" => Ok(PageEditor::HtmlArea),
            "markdown" => Ok(PageEditor::Markdown),
            "textarea" | "" => Ok(PageEditor::TextArea),
            other => Err(format!("unknown page editor '{other}'")),
        }
    }
}

/// A page belonging to exactly one site.
///
/// `alias` is the route key within the site. It is either a literal path
/// (`/about`) or a pattern containing tokens such as `:num` or `:any`
/// (`/user/:num`), see [`crate::application::services::alias_pattern`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub site_id: String,
    pub alias: String,
    pub name: String,
    pub content: String,
    pub editor: PageEditor,
    pub template_id: Option<String>,
    pub canonical_url: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub meta_robots: String,
    pub title: String,
    /// Middleware names applied, in order, before the `after` list.
    pub middlewares_before: Vec<String>,
    pub middlewares_after: Vec<String>,
    pub status: Status,
    pub soft_deleted_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Creates an active page with empty metadata.
    pub fn new(
        id: impl Into<String>,
        site_id: impl Into<String>,
        alias: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            site_id: site_id.into(),
            alias: alias.into(),
            name: String::new(),
            content: content.into(),
            editor: PageEditor::default(),
            template_id: None,
            canonical_url: String::new(),
            meta_description: String::new(),
            meta_keywords: String::new(),
            meta_robots: String::new(),
            title: String::new(),
            middlewares_before: Vec::new(),
            middlewares_after: Vec::new(),
            status: Status::Active,
            soft_deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active && self.soft_deleted_at.is_none()
    }

    /// Template id, treating an empty string as "no template".
    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns true if the alias contains pattern tokens.
    pub fn has_pattern_alias(&self) -> bool {
        self.alias.contains(':')
    }
}
