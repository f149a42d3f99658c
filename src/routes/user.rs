//! User routes.

use axum::routing::get;
use axum::{Json, Router};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::RequestLocalizer;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(current_user))
}

/// Profile skeleton for the calling user. Token verification is an external
/// concern; only the bearer token's presence is enforced here.
async fn current_user(
    localizer: RequestLocalizer,
    token: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, ApiError> {
    if token.is_none() {
        return Err(ApiError::Unauthorized(
            localizer.translate("auth.missingToken"),
        ));
    }
    Ok(Json(json!({
        "id": "me",
        "locale": localizer.locale().as_str(),
    })))
}
