//! Localization manager: process-wide translation state.
//!
//! The manager owns the locale configuration and the loaded catalogs. The
//! process constructs it once via [`LocalizationManager::global_with`] during
//! startup; request handling reads it through the per-request localizer that
//! the locale binder middleware installs. Catalogs and configuration are
//! immutable after construction and safe to share across requests.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock, RwLock};

use axum::Router;
use thiserror::Error;
use tracing::{debug, info};

use crate::i18n::catalog::{CatalogStore, PhraseTable};
use crate::i18n::locale::Locale;

/// Options controlling the localization subsystem.
///
/// Fixed after the manager is first constructed; later construction attempts
/// do not reconfigure anything.
#[derive(Debug, Clone)]
pub struct LocaleOptions {
    /// Locale codes the service answers in.
    pub locales: Vec<String>,

    /// Locale used when a request expresses no usable preference.
    pub default_locale: String,

    /// Directory holding one `<code>.json` phrase file per locale.
    pub directory: PathBuf,

    /// Whether nested phrase objects are flattened into dot-joined keys.
    pub object_notation: bool,
}

impl Default for LocaleOptions {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "fr".to_string(), "es".to_string()],
            default_locale: "en".to_string(),
            directory: PathBuf::from("locales"),
            object_notation: true,
        }
    }
}

/// Errors that abort startup of the localization subsystem.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("default locale '{0}' is not among the supported locales")]
    UnsupportedDefault(String),

    #[error("catalog directory '{}' does not exist", .0.display())]
    CatalogDirectory(PathBuf),

    #[error("failed to read catalog file '{}'", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file '{}'", .path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Global manager instance (initialized once at startup).
static MANAGER: OnceLock<Arc<LocalizationManager>> = OnceLock::new();

/// Owner of the locale configuration, the catalog store, and the ambient
/// locale.
#[derive(Debug)]
pub struct LocalizationManager {
    supported: Vec<Locale>,
    default_locale: Locale,
    store: CatalogStore,
    ambient: RwLock<Locale>,
}

impl LocalizationManager {
    /// Build a standalone manager from `options`.
    ///
    /// Validates that the default locale is among the supported set and
    /// loads every catalog. Tests construct managers directly; the process
    /// goes through [`global_with`](Self::global_with).
    pub fn new(options: LocaleOptions) -> Result<LocalizationManager, LocaleError> {
        let supported: Vec<Locale> = options.locales.iter().map(|code| Locale::new(code)).collect();
        let default_locale = Locale::new(&options.default_locale);
        if !supported.contains(&default_locale) {
            return Err(LocaleError::UnsupportedDefault(options.default_locale));
        }

        let store = CatalogStore::load(&options.directory, &supported, options.object_notation)?;
        info!(
            locales = supported.len(),
            default = %default_locale,
            directory = %options.directory.display(),
            "loaded locale catalogs"
        );

        Ok(LocalizationManager {
            supported,
            default_locale: default_locale.clone(),
            store,
            ambient: RwLock::new(default_locale),
        })
    }

    /// Return the process-wide manager, constructing it on the first call.
    ///
    /// Later calls ignore `options` and hand back the existing instance, so
    /// the configuration is fixed for the lifetime of the process.
    /// Construction is expected to happen during single-threaded startup.
    pub fn global_with(options: LocaleOptions) -> Result<Arc<LocalizationManager>, LocaleError> {
        if let Some(existing) = MANAGER.get() {
            return Ok(Arc::clone(existing));
        }
        let manager = Arc::new(LocalizationManager::new(options)?);
        Ok(Arc::clone(MANAGER.get_or_init(|| manager)))
    }

    /// Register the locale binder on `router` as the outermost layer, so
    /// every handler below it sees a bound
    /// [`RequestLocalizer`](crate::middleware::RequestLocalizer).
    ///
    /// Call once, after all routes and other layers are in place.
    pub fn initialize(self: &Arc<Self>, router: Router) -> Router {
        router.layer(axum::middleware::from_fn_with_state(
            Arc::clone(self),
            crate::middleware::locale::bind_request_locale,
        ))
    }

    /// Translate `key` under the configured default locale.
    pub fn translate(&self, key: &str) -> String {
        self.translate_in(&self.default_locale, key)
    }

    /// Translate `key` under `locale`.
    ///
    /// Unsupported locales resolve to the default locale first. A key with
    /// no phrase in the resolved catalog falls back to the default locale's
    /// phrase, then to the key itself; this never fails.
    pub fn translate_in(&self, locale: &Locale, key: &str) -> String {
        let locale = self.resolve(locale);
        if let Some(phrase) = self.store.phrase(&locale, key) {
            return phrase.to_string();
        }
        if locale != self.default_locale {
            if let Some(phrase) = self.store.phrase(&self.default_locale, key) {
                return phrase.to_string();
            }
        }
        debug!(key = %key, locale = %locale, "no catalog phrase for key");
        key.to_string()
    }

    /// Match `candidate` against the supported set: exact match first, then
    /// by primary subtag (`en-us` matches a supported `en`).
    pub fn match_supported(&self, candidate: &Locale) -> Option<Locale> {
        if let Some(exact) = self.supported.iter().find(|locale| *locale == candidate) {
            return Some(exact.clone());
        }
        let primary = candidate.primary_subtag();
        self.supported
            .iter()
            .find(|locale| locale.as_str() == primary)
            .cloned()
    }

    /// Resolve `candidate` to a supported locale, falling back to the
    /// default locale. Never an arbitrary locale, never an error.
    pub fn resolve(&self, candidate: &Locale) -> Locale {
        self.match_supported(candidate)
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Set the ambient locale.
    ///
    /// The ambient locale is process-wide mutable state for use outside
    /// request scope (startup tasks, tooling). Request handlers must not
    /// rely on it under concurrent traffic; the per-request localizer bound
    /// by the locale binder is the supported path.
    pub fn set_locale(&self, tag: &str) {
        let locale = self.resolve(&Locale::new(tag));
        *self.ambient.write().expect("ambient locale lock poisoned") = locale;
    }

    /// The current ambient locale. See [`set_locale`](Self::set_locale) for
    /// the concurrency caveat.
    pub fn current_locale(&self) -> Locale {
        self.ambient
            .read()
            .expect("ambient locale lock poisoned")
            .clone()
    }

    /// The configured supported locales.
    pub fn available_locales(&self) -> &[Locale] {
        &self.supported
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Snapshot of the full catalog for the current ambient locale.
    pub fn catalog(&self) -> PhraseTable {
        let locale = self.current_locale();
        self.store.table(&locale).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Build a manager over temp-dir catalogs. Returns the dir so it stays
    /// alive for the manager's lifetime.
    fn manager_with(catalogs: &[(&str, &str)], default_locale: &str) -> (TempDir, LocalizationManager) {
        let dir = TempDir::new().expect("temp dir");
        let mut locales = Vec::new();
        for (code, content) in catalogs {
            std::fs::write(dir.path().join(format!("{}.json", code)), content)
                .expect("write catalog");
            locales.push(code.to_string());
        }
        let options = LocaleOptions {
            locales,
            default_locale: default_locale.to_string(),
            directory: dir.path().to_path_buf(),
            object_notation: true,
        };
        let manager = LocalizationManager::new(options).expect("manager");
        (dir, manager)
    }

    fn test_manager() -> (TempDir, LocalizationManager) {
        manager_with(
            &[
                ("en", r#"{"greeting": "Hello", "only.english": "English only"}"#),
                ("fr", r#"{"greeting": "Bonjour"}"#),
            ],
            "en",
        )
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_default_options() {
        let options = LocaleOptions::default();
        assert_eq!(options.locales, vec!["en", "fr", "es"]);
        assert_eq!(options.default_locale, "en");
        assert!(options.object_notation);
    }

    #[test]
    fn test_default_locale_must_be_supported() {
        let dir = TempDir::new().expect("temp dir");
        let options = LocaleOptions {
            locales: vec!["en".to_string()],
            default_locale: "de".to_string(),
            directory: dir.path().to_path_buf(),
            object_notation: true,
        };

        let result = LocalizationManager::new(options);

        assert!(matches!(result, Err(LocaleError::UnsupportedDefault(_))));
    }

    #[test]
    fn test_missing_catalog_directory_is_fatal() {
        let options = LocaleOptions {
            directory: PathBuf::from("/definitely/not/here"),
            ..LocaleOptions::default()
        };

        let result = LocalizationManager::new(options);

        assert!(matches!(result, Err(LocaleError::CatalogDirectory(_))));
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_translate_uses_default_locale() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.translate("greeting"), "Hello");
    }

    #[test]
    fn test_translate_in_uses_requested_locale() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.translate_in(&Locale::new("fr"), "greeting"), "Bonjour");
    }

    #[test]
    fn test_translate_missing_key_echoes_key() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_translate_in_falls_back_to_default_locale_phrase() {
        let (_dir, manager) = test_manager();
        // fr has no entry for this key, en does
        assert_eq!(
            manager.translate_in(&Locale::new("fr"), "only.english"),
            "English only"
        );
    }

    #[test]
    fn test_translate_in_unsupported_locale_uses_default() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.translate_in(&Locale::new("de"), "greeting"), "Hello");
    }

    #[test]
    fn test_translate_ambient_locale_does_not_leak_into_translate() {
        let (_dir, manager) = test_manager();
        manager.set_locale("fr");
        assert_eq!(manager.translate("greeting"), "Hello");
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_resolve_exact_match() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.resolve(&Locale::new("fr")).as_str(), "fr");
    }

    #[test]
    fn test_resolve_region_variant_matches_primary() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.resolve(&Locale::new("fr-CA")).as_str(), "fr");
        assert_eq!(manager.resolve(&Locale::new("en_US")).as_str(), "en");
    }

    #[test]
    fn test_resolve_unsupported_falls_back_to_default() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.resolve(&Locale::new("de")).as_str(), "en");
        assert_eq!(manager.resolve(&Locale::new("")).as_str(), "en");
    }

    #[test]
    fn test_match_supported_unsupported_is_none() {
        let (_dir, manager) = test_manager();
        assert!(manager.match_supported(&Locale::new("de")).is_none());
    }

    // ==================== Ambient Locale Tests ====================

    #[test]
    fn test_set_locale_and_current_locale() {
        let (_dir, manager) = test_manager();
        assert_eq!(manager.current_locale().as_str(), "en");

        manager.set_locale("fr");
        assert_eq!(manager.current_locale().as_str(), "fr");
    }

    #[test]
    fn test_set_locale_unsupported_resolves_to_default() {
        let (_dir, manager) = test_manager();
        manager.set_locale("de");
        assert_eq!(manager.current_locale().as_str(), "en");
    }

    #[test]
    fn test_catalog_follows_ambient_locale() {
        let (_dir, manager) = test_manager();
        manager.set_locale("fr");

        let catalog = manager.catalog();

        assert_eq!(catalog.get("greeting").map(String::as_str), Some("Bonjour"));
    }

    // ==================== Introspection Tests ====================

    #[test]
    fn test_available_locales() {
        let (_dir, manager) = test_manager();
        let codes: Vec<&str> = manager.available_locales().iter().map(Locale::as_str).collect();
        assert_eq!(codes, vec!["en", "fr"]);
    }

    // ==================== Singleton Tests ====================

    #[test]
    #[serial]
    fn test_global_with_returns_same_instance() {
        let first = LocalizationManager::global_with(LocaleOptions::default())
            .expect("first construction");

        // Different options on the second call are ignored
        let second = LocalizationManager::global_with(LocaleOptions {
            default_locale: "fr".to_string(),
            ..LocaleOptions::default()
        })
        .expect("second construction");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.default_locale().as_str(), "en");
    }

    // ==================== Fallback Law ====================

    proptest! {
        #[test]
        fn prop_translate_echoes_absent_keys(suffix in "[a-z0-9]{1,24}") {
            let (_dir, manager) = test_manager();
            let key = format!("absent.{}", suffix);
            prop_assert_eq!(manager.translate(&key), key.clone());
            prop_assert_eq!(manager.translate_in(&Locale::new("fr"), &key), key);
        }
    }
}
