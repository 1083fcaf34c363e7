//! Unified error handling for the HTTP surface.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::business::BusinessError;
use crate::db::DbError;

/// Application-level error type for the directory API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier, query or body.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub status: &'static str,
    pub message: String,
}

impl From<BusinessError> for AppError {
    fn from(err: BusinessError) -> Self {
        match err {
            BusinessError::InvalidParameters(message) => Self::InvalidParameter(message),
            BusinessError::NotFound(message) => Self::NotFound(message),
            BusinessError::Storage(e) => Self::Database(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidParameter(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidParameter(rejection.body_text())
    }
}

impl AppError {
    const fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidParameter(_) => (StatusCode::BAD_REQUEST, "INVALID_PARAMETER"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Directory request error"
            );
        }

        let (status, label) = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::InvalidParameter(message) | Self::NotFound(message) => message.clone(),
            Self::Database(_) => "Internal server error".to_string(),
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            status: label,
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Customer 42 does not exist".to_string());
        assert_eq!(err.to_string(), "Not found: Customer 42 does not exist");

        let err = AppError::InvalidParameter("x is not an UUID".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: x is not an UUID");
    }

    #[test]
    fn test_business_errors_map_to_status_codes() {
        fn get_status(err: BusinessError) -> StatusCode {
            AppError::from(err).into_response().status()
        }

        assert_eq!(
            get_status(BusinessError::InvalidParameters("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(BusinessError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(BusinessError::Storage(DbError::Interrupted)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_storage_details_stay_private() {
        let response = AppError::Database(DbError::Interrupted).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["code"], 500);
        assert_eq!(body["status"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["message"], "Internal server error");
    }
}
