//! Application assembly: routes, middleware layering, and the fallback.

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::middleware::translate_validation_failure;
use crate::routes;
use crate::state::AppState;

/// Build the full application router.
///
/// Layer order matters: the locale binder installed by
/// [`LocalizationManager::initialize`](crate::i18n::LocalizationManager::initialize)
/// is the outermost layer, so the validation error translator and every
/// handler below it see a bound localizer.
pub fn build_router(state: AppState) -> Router {
    let manager = Arc::clone(&state.localization);

    let api = Router::new()
        .nest("/auth", routes::auth::router())
        .nest("/user", routes::user::router())
        .nest("/test", routes::testing::router());

    let router = Router::new()
        .route("/healthz", get(health))
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(middleware::from_fn(translate_validation_failure))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    manager.initialize(router)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("route".to_string())
}
