//! Request helpers used at the HTTP boundary.
//!
//! - [`host`] - Host extraction from headers or the URI authority
//! - [`language`] - Render language from the `lang` query or `Accept-Language`

pub mod host;
pub mod language;

pub use host::extract_host;
pub use language::select_language;
