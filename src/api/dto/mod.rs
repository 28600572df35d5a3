//! Data Transfer Objects for JSON responses.
//!
//! Pages are served as HTML; only the health endpoint speaks JSON.

pub mod health;
