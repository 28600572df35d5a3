//! Template entity: wrapping markup for pages.

use serde::{Deserialize, Serialize};

use super::Status;

/// Wrapping markup into which a page's content is substituted via
/// `[[PageContent]]`. Templates are never wrapped by other templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
    pub status: Status,
}

impl Template {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            content: content.into(),
            status: Status::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}
