//! Site entity: a tenant served by this process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// A tenant site.
///
/// Every entry of `domain_names` is an endpoint used verbatim as a prefix of
/// `host + path`: a bare domain (`example.com`), a subdomain
/// (`blog.example.com`) or a domain with a subdirectory (`example.com/blog`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub domain_names: Vec<String>,
    pub status: Status,
    pub soft_deleted_at: Option<DateTime<Utc>>,
}

impl Site {
    /// Creates an active site with the given endpoints.
    pub fn new(id: impl Into<String>, domain_names: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            domain_names,
            status: Status::Active,
            soft_deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active && !self.is_soft_deleted()
    }

    pub fn is_soft_deleted(&self) -> bool {
        self.soft_deleted_at.is_some()
    }
}
