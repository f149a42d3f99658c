//! Authentication routes: input validation and response shaping. The
//! credential store itself lives outside this scaffold.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::RequestLocalizer;
use crate::state::AppState;
use crate::validation::{ValidateInput, ValidatedJson, ValidationFailure};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl ValidateInput for Credentials {
    fn validate(&self) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        if self.email.is_empty() {
            failure.push("email", "email", "email is required");
        } else if !self.email.contains('@') {
            failure.push("email", "email", "email must be a valid address");
        }
        if self.password.is_empty() {
            failure.push("password", "password", "password is required");
        } else if self.password.chars().count() < 8 {
            failure.push("password", "password", "password is too short");
        }
        failure.into_result()
    }
}

async fn signup(
    localizer: RequestLocalizer,
    ValidatedJson(body): ValidatedJson<Credentials>,
) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "email": body.email,
            "message": localizer.translate("auth.accountCreated"),
        })),
    )
}

async fn login(
    localizer: RequestLocalizer,
    ValidatedJson(_body): ValidatedJson<Credentials>,
) -> Result<Json<Value>, ApiError> {
    // Credential checking is wired in by the embedding application.
    Err(ApiError::Unauthorized(
        localizer.translate("auth.invalidCredentials"),
    ))
}
