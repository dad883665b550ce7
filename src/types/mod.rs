//! Common types and error handling shared across the crate.

use axum::http::StatusCode;
use axum::response::IntoResponse;

// ============= Error Types =============

/// Application-level error taxonomy.
///
/// Validation problems map to 400, auth problems to 401, absence to 404 and
/// everything else to 500. Storage detail never reaches the client; handlers
/// log it and surface a fixed message instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_keep_context() {
        let err = AppError::Storage("connection refused".to_string());
        assert_eq!(err.to_string(), "Storage error: connection refused");

        let err = AppError::InvalidInput("name is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: name is required");
    }
}
