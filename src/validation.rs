//! Input-validation contract for request payloads.
//!
//! Payload types implement [`ValidateInput`]; the [`ValidatedJson`]
//! extractor deserializes the body and runs the rules. Failures surface as
//! [`ApiError::Validation`] carrying a [`ValidationFailure`], which the
//! validation error translator middleware localizes before the response
//! leaves the service.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as reported to the client.
    pub name: String,

    /// Path of the offending value inside the request body.
    pub path: String,

    /// Phrase key describing the failure; translated before leaving the
    /// service.
    pub message: String,
}

/// Ordered collection of field errors for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    pub fields: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new() -> ValidationFailure {
        ValidationFailure::default()
    }

    /// Record a failure for `name`. Only the first message per field is
    /// kept; later rules for an already-rejected field are dropped.
    pub fn push(&mut self, name: &str, path: &str, message: &str) {
        if self.fields.iter().any(|field| field.name == name) {
            return;
        }
        self.fields.push(FieldError {
            name: name.to_string(),
            path: path.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Err(self)` when any field was rejected.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Contract implemented by request payloads that carry validation rules.
pub trait ValidateInput {
    fn validate(&self) -> Result<(), ValidationFailure>;
}

/// JSON body extractor that runs the payload's validation rules.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ValidateInput,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "rejected malformed request body");
                let mut failure = ValidationFailure::new();
                failure.push("body", "body", "request body must be valid json");
                ApiError::Validation(failure)
            })?;
        value.validate().map_err(ApiError::Validation)?;
        Ok(ValidatedJson(value))
    }
}
