//! Block entity: reusable content fragment.

use serde::{Deserialize, Serialize};

use super::Status;

/// A reusable fragment referenced from content as `[[BLOCK_<id>]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub name: String,
    pub content: String,
    pub status: Status,
}

impl Block {
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
