//! Localization probe routes used by integration checks.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::i18n::Locale;
use crate::middleware::RequestLocalizer;
use crate::state::AppState;
use crate::validation::{ValidateInput, ValidatedJson, ValidationFailure};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/localization", get(localization_probe))
        .route("/localization-validation", post(localization_validation_probe))
        .route("/locales", get(list_locales))
}

async fn localization_probe(localizer: RequestLocalizer) -> Json<Value> {
    Json(json!({ "status": localizer.translate("healthCheck") }))
}

#[derive(Debug, Deserialize)]
pub struct LocalizationProbe {
    #[serde(default)]
    pub text: String,
}

impl ValidateInput for LocalizationProbe {
    fn validate(&self) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        if self.text.is_empty() {
            failure.push("text", "text", "text is required");
        }
        failure.into_result()
    }
}

/// Translate an arbitrary phrase key supplied by the caller.
async fn localization_validation_probe(
    localizer: RequestLocalizer,
    ValidatedJson(body): ValidatedJson<LocalizationProbe>,
) -> Json<Value> {
    Json(json!({ "status": localizer.translate(&body.text) }))
}

async fn list_locales(
    State(state): State<AppState>,
    localizer: RequestLocalizer,
) -> Json<Value> {
    let locales: Vec<&str> = state
        .localization
        .available_locales()
        .iter()
        .map(Locale::as_str)
        .collect();
    Json(json!({
        "locales": locales,
        "default": state.localization.default_locale().as_str(),
        "active": localizer.locale().as_str(),
    }))
}
