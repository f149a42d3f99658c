//! Shared application state.

use std::sync::Arc;

use crate::i18n::LocalizationManager;

/// State handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub localization: Arc<LocalizationManager>,
}

impl AppState {
    pub fn new(localization: Arc<LocalizationManager>) -> AppState {
        AppState { localization }
    }
}
