//! HTTP request handlers.
//!
//! - [`frontend`] - Catch-all page rendering
//! - [`health`] - Store and cache health

pub mod frontend;
pub mod health;

pub use frontend::frontend_handler;
pub use health::health_handler;
