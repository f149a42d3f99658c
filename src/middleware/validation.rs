//! Validation error translator.
//!
//! Sits between the locale binder and the routes. Responses produced from
//! [`ApiError::Validation`](crate::error::ApiError) carry their structured
//! failure in the response extensions; this middleware rewrites them into
//! the localized payload and terminates the request. Every other response
//! passes through untouched, so non-validation errors keep their own
//! status mapping.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::middleware::locale::RequestLocalizer;
use crate::validation::ValidationFailure;

/// Phrase key for the top-level message of a validation response.
pub const VALIDATION_FAILED_KEY: &str = "request validation failed";

/// Translated message of the last rejected field, recorded on the response
/// for downstream logging layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseErrorMessage(pub String);

/// Middleware localizing structured validation failures.
pub async fn translate_validation_failure(req: Request, next: Next) -> Response {
    let localizer = req.extensions().get::<RequestLocalizer>().cloned();
    let mut response = next.run(req).await;

    let Some(failure) = response.extensions_mut().remove::<ValidationFailure>() else {
        return response;
    };
    let Some(localizer) = localizer else {
        return response;
    };

    warn!(
        locale = %localizer.locale(),
        fields = failure.fields.len(),
        "request input failed validation"
    );

    let mut validation = Map::new();
    let mut last_message = None;
    for field in &failure.fields {
        let message = localizer.translate(&field.message);
        validation.insert(
            field.name.clone(),
            json!({
                "source": field.name,
                "keys": field.path,
                "message": message,
            }),
        );
        last_message = Some(message);
    }

    let body = json!({
        "statusCode": StatusCode::BAD_REQUEST.as_u16(),
        "error": "Bad Request",
        "message": localizer.translate(VALIDATION_FAILED_KEY),
        "validation": Value::Object(validation),
    });
    let mut response = (StatusCode::BAD_REQUEST, Json(body)).into_response();
    if let Some(message) = last_message {
        response.extensions_mut().insert(ResponseErrorMessage(message));
    }
    response
}
