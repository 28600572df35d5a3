//! HTTP boundary: turns `(Host, path)` requests into render calls.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for the health response
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
