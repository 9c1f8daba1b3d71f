//! API error types with JSON `{ "error": ... }` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;

/// Error response body consumed by the admin dashboard.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    /// An aggregate endpoint failed; `message` is what the client sees.
    #[error("{message}: {detail}")]
    Aggregate {
        message: &'static str,
        detail: String,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn aggregate(message: &'static str, err: impl std::fmt::Display) -> Self {
        ApiError::Aggregate {
            message,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::Aggregate { message, detail } => {
                tracing::error!(detail, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<crate::db::DatabaseError> for ApiError {
    fn from(err: crate::db::DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
