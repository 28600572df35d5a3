//! Extension points supplied by the embedding application.
//!
//! - [`Shortcode`] - tag-like content generator expanded during rendering
//! - [`Middleware`] / [`MiddlewareDispatcher`] - post-render HTML transforms
//! - [`BlockEditorRenderer`] - converts block-editor documents to HTML

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::context::RequestContext;
use crate::error::AppError;

/// A registered shortcode, invoked for every `<alias ...>` tag in content.
///
/// Shortcodes are registered process-wide and run in registration order.
/// Their output is inserted verbatim and is not fed back into the pipeline.
#[async_trait]
pub trait Shortcode: Send + Sync {
    /// Tag name matched in content (e.g. `year` for `<year>`).
    fn alias(&self) -> &str;

    /// Renders one occurrence.
    ///
    /// `content` is the text between `<alias>` and `</alias>` (empty for
    /// unpaired tags); `attrs` are the tag attributes.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole render.
    async fn render(
        &self,
        ctx: &RequestContext,
        content: &str,
        attrs: &BTreeMap<String, String>,
    ) -> Result<String, AppError>;
}

/// A named HTML transform applied after rendering.
#[async_trait]
pub trait Middleware: Send + Sync {
    fn name(&self) -> &str;

    async fn apply(&self, ctx: &RequestContext, html: String) -> String;
}

/// Applies a page's `before` and `after` middleware lists to rendered HTML.
#[async_trait]
pub trait MiddlewareDispatcher: Send + Sync {
    async fn apply(
        &self,
        ctx: &RequestContext,
        html: String,
        before: &[String],
        after: &[String],
    ) -> String;
}

/// One node of a block-editor document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorBlock {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<EditorBlock>,
}

impl EditorBlock {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, key: &str, value: impl Into<String>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: EditorBlock) -> Self {
        self.children.push(child);
        self
    }

    pub fn parameter(&self, key: &str) -> &str {
        self.parameters.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Converts a parsed block-editor document into HTML.
pub trait BlockEditorRenderer: Send + Sync {
    fn render(&self, blocks: &[EditorBlock]) -> String;
}
