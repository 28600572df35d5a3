//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and block-editor
//! rendering.
//!
//! # Modules
//!
//! - [`block_renderer`] - Default HTML renderer for block-editor documents
//! - [`cache`] - Cache backends (Redis, in-memory and no-op)
//! - [`persistence`] - PostgreSQL Store implementation

pub mod block_renderer;
pub mod cache;
pub mod persistence;
