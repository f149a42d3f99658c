//! Request locale binder.
//!
//! Runs once per request, ahead of every route handler: resolves the
//! request's locale and inserts a [`RequestLocalizer`] into the request
//! extensions. Handlers take the localizer as an extractor. The shared
//! catalogs are never mutated here, so concurrent requests with different
//! locale preferences stay isolated from each other and from the ambient
//! locale.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::error::ApiError;
use crate::i18n::locale::Locale;
use crate::i18n::manager::LocalizationManager;
use crate::i18n::resolver;

/// Translation context bound to a single in-flight request.
///
/// Created by [`bind_request_locale`] and discarded with the request.
#[derive(Clone)]
pub struct RequestLocalizer {
    locale: Locale,
    manager: Arc<LocalizationManager>,
}

impl RequestLocalizer {
    pub fn new(locale: Locale, manager: Arc<LocalizationManager>) -> RequestLocalizer {
        RequestLocalizer { locale, manager }
    }

    /// The locale resolved for this request.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Translate `key` under the request's locale.
    pub fn translate(&self, key: &str) -> String {
        self.manager.translate_in(&self.locale, key)
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequestLocalizer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestLocalizer>()
            .cloned()
            .ok_or_else(|| {
                ApiError::Internal("locale binder did not run before this handler".to_string())
            })
    }
}

/// Middleware resolving the request locale and binding the localizer.
pub async fn bind_request_locale(
    State(manager): State<Arc<LocalizationManager>>,
    mut req: Request,
    next: Next,
) -> Response {
    let locale = resolver::resolve_request_locale(&manager, req.uri().query(), req.headers());
    debug!(locale = %locale, path = %req.uri().path(), "bound request locale");
    req.extensions_mut()
        .insert(RequestLocalizer::new(locale, manager));
    next.run(req).await
}
