//! PostgreSQL Store implementation.
//!
//! Queries are assembled at runtime with `sqlx::QueryBuilder` so the list
//! filters stay optional without a combinatorial set of static statements.
//!
//! # Stores
//!
//! - [`PgStore`] - Sites, pages, blocks, templates and translations

pub mod pg_store;

pub use pg_store::PgStore;
