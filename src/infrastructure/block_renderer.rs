//! Default HTML renderer for block-editor documents.

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::debug;

use crate::domain::extensions::{BlockEditorRenderer, EditorBlock};

/// Renders the built-in block types.
///
/// | type        | parameters                 |
/// |-------------|----------------------------|
/// | `heading`   | `level` (1-6), `content`   |
/// | `paragraph` | `content`                  |
/// | `html`      | `content` (inserted raw)   |
/// | `image`     | `src`, `alt`               |
/// | `link`      | `href`, `content`          |
/// | `container` | `class`, children          |
///
/// Text and attributes are HTML-escaped. Unknown block types render only
/// their children.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBlockRenderer;

impl HtmlBlockRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_block(&self, block: &EditorBlock, out: &mut String) {
        match block.kind.as_str() {
            "heading" => {
                let level = block
                    .parameter("level")
                    .parse::<u8>()
                    .ok()
                    .filter(|l| (1..=6).contains(l))
                    .unwrap_or(2);
                out.push_str(&format!(
                    "<h{level}>{}</h{level}>",
                    encode_text(block.parameter("content"))
                ));
            }
            "paragraph" => {
                out.push_str("<p>");
                out.push_str(&encode_text(block.parameter("content")));
                out.push_str("</p>");
            }
            "html" => out.push_str(block.parameter("content")),
            "image" => {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    encode_double_quoted_attribute(block.parameter("src")),
                    encode_double_quoted_attribute(block.parameter("alt"))
                ));
            }
            "link" => {
                out.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    encode_double_quoted_attribute(block.parameter("href")),
                    encode_text(block.parameter("content"))
                ));
            }
            "container" => {
                let class = block.parameter("class");
                if class.is_empty() {
                    out.push_str("<div>");
                } else {
                    out.push_str(&format!(
                        "<div class=\"{}\">",
                        encode_double_quoted_attribute(class)
                    ));
                }
                self.render_children(block, out);
                out.push_str("</div>");
            }
            other => {
                debug!(block_type = other, block_id = %block.id, "Unknown block type");
                self.render_children(block, out);
            }
        }
    }

    fn render_children(&self, block: &EditorBlock, out: &mut String) {
        for child in &block.children {
            self.render_block(child, out);
        }
    }
}

impl BlockEditorRenderer for HtmlBlockRenderer {
    fn render(&self, blocks: &[EditorBlock]) -> String {
        let mut out = String::new();
        for block in blocks {
            self.render_block(block, &mut out);
        }
        out
    }
}
