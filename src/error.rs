//! Request-path error type mapped to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationFailure;

/// Application-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request input failed its validation rules.
    #[error("request validation failed")]
    Validation(ValidationFailure),

    /// Authentication required or rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(failure) => validation_response(failure),
            other => {
                let status = match &other {
                    ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                    ApiError::Validation(_) | ApiError::Internal(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let body = json!({
                    "error": {
                        "code": status.as_u16(),
                        "message": other.to_string(),
                    }
                });
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Untranslated 400 skeleton carrying the structured failure in its
/// extensions. The validation error translator rebuilds the body with
/// localized messages.
fn validation_response(failure: ValidationFailure) -> Response {
    let body = json!({
        "statusCode": StatusCode::BAD_REQUEST.as_u16(),
        "error": "Bad Request",
        "message": "request validation failed",
        "validation": {},
    });
    let mut response = (StatusCode::BAD_REQUEST, Json(body)).into_response();
    response.extensions_mut().insert(failure);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400_with_failure_extension() {
        let mut failure = ValidationFailure::new();
        failure.push("name", "name", "name is required");

        let response = ApiError::Validation(failure.clone()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.extensions().get::<ValidationFailure>(),
            Some(&failure)
        );
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = ApiError::Unauthorized("no token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("route".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
