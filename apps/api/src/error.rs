//! HTTP error mapping for the API boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use unlockery_core::AppError;

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Configuration(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Upstream and internal detail stays in the server logs; the client
        // receives a fixed message.
        let message = match &self.0 {
            AppError::Upstream(detail) => {
                error!(detail = %detail, "achievement generation failed upstream");
                "Failed to generate achievements".to_owned()
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                "internal error".to_owned()
            }
            other => other.message().to_owned(),
        };

        let payload = Json(ErrorResponse { error: message });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
