use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use computer_manager_core::error::CoreError;
use computer_manager_db::StoreError;
use computer_manager_events::NotificationError;
use serde_json::json;

use crate::config::ConfigError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{"error": ..., "code": ...}`
/// bodies. Client mistakes map to 400; every store failure, including a
/// missing record, maps to 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level validation error from `computer_manager_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed record store operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::ImmutableField(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", core.to_string())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// All store errors are server errors. Missing and duplicate records keep
/// their message; database failures are logged and sanitized.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { .. } => {
            tracing::warn!(error = %err, "Record store lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "NOT_FOUND", err.to_string())
        }
        StoreError::Duplicate { .. } => {
            tracing::warn!(error = %err, "Record store insert rejected");
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFLICT", err.to_string())
        }
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Fatal error while bringing the server up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize db session: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to migrate database schema: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("failed to build notification client: {0}")]
    Notifier(#[from] NotificationError),

    #[error("invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
