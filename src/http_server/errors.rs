//! # HTTP API Errors
//!
//! Maps validation results and request failures to client-visible
//! rejections.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::FieldViolation;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request data does not satisfy its shape
    #[error("Request validation failed ({} violation(s))", .0.len())]
    Validation(Vec<FieldViolation>),

    /// Person id not in the people list
    #[error("¡This person doesn't exist!")]
    PersonNotFound(i64),

    /// Malformed multipart payload
    #[error("Invalid multipart payload: {0}")]
    Multipart(String),

    /// Required file part not supplied
    #[error("Missing file field: {0}")]
    MissingFile(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MissingFile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PersonNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<Vec<FieldViolation>> for ApiError {
    fn from(violations: Vec<FieldViolation>) -> Self {
        ApiError::Validation(violations)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        let error = err.to_string();
        let violations = match err {
            ApiError::Validation(violations) => violations,
            _ => Vec::new(),
        };
        Self {
            error,
            code,
            violations,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(vec![FieldViolation::missing("age")]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::PersonNotFound(9).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Multipart("boundary".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_violations_carried_into_body() {
        let err = ApiError::from(vec![
            FieldViolation::missing("age"),
            FieldViolation::missing("password"),
        ]);
        let body = ErrorResponse::from(err);
        assert_eq!(body.code, 422);
        assert_eq!(body.violations.len(), 2);
        assert!(body.error.contains("2 violation"));
    }

    #[test]
    fn test_not_found_body_has_no_violations() {
        let body = ErrorResponse::from(ApiError::PersonNotFound(7));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "¡This person doesn't exist!");
        assert_eq!(json["code"], 404);
        assert!(json.get("violations").is_none());
    }
}
