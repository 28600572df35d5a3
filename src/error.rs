//! Application error taxonomy.
//!
//! Not-found conditions are never errors: resolvers return `Ok(None)` and the
//! orchestrator turns them into user-facing messages. [`AppError`] covers the
//! remaining failure classes: Store faults, invalid queries, pipeline faults
//! and cancelled requests.

use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// I/O or driver failure reported by the Store collaborator.
    #[error("store error: {message}")]
    Store { message: String, details: Value },

    /// A query or input rejected before reaching the Store.
    #[error("validation error: {message}")]
    Validation { message: String, details: Value },

    /// A content pipeline stage failed (e.g. a shortcode render).
    #[error("render error: {message}")]
    Render { message: String, details: Value },

    /// The request was cancelled or timed out before completion.
    #[error("request cancelled")]
    Cancelled,

    #[error("internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn render(message: impl Into<String>, details: Value) -> Self {
        Self::Render {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Short machine-readable code, used as a log field and metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Store { .. } => "store_error",
            AppError::Validation { .. } => "validation_error",
            AppError::Render { .. } => "render_error",
            AppError::Cancelled => "cancelled",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            AppError::Store { details, .. }
            | AppError::Validation { details, .. }
            | AppError::Render { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
            AppError::Cancelled => json!({}),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        return AppError::store(
            "Database error",
            json!({ "code": db.code(), "message": db.message() }),
        );
    }

    if matches!(e, sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) {
        return AppError::store("Database pool unavailable", json!({ "reason": e.to_string() }));
    }

    AppError::store("Database error", json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::store("x", json!({})).code(), "store_error");
        assert_eq!(AppError::validation("x", json!({})).code(), "validation_error");
        assert_eq!(AppError::render("x", json!({})).code(), "render_error");
        assert_eq!(AppError::Cancelled.code(), "cancelled");
    }

    #[test]
    fn test_display_includes_message() {
        let err = AppError::store("connection reset", json!({"domain": "example.com"}));
        assert_eq!(err.to_string(), "store error: connection reset");
        assert_eq!(err.details()["domain"], "example.com");
    }

    #[test]
    fn test_pool_timeout_maps_to_store_error() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Store { .. }));
    }
}
