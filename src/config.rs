use std::path::PathBuf;

use anyhow::Result;

use crate::i18n::LocaleOptions;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server
    pub port: u16,

    // Localization
    pub supported_locales: Vec<String>,
    pub default_locale: String,
    pub locales_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Localization
            supported_locales: parse_locale_list(
                &std::env::var("SUPPORTED_LOCALES").unwrap_or_else(|_| "en,fr,es".to_string()),
            ),
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
            locales_dir: std::env::var("LOCALES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("locales")),
        })
    }

    /// Locale options derived from the environment configuration.
    pub fn locale_options(&self) -> LocaleOptions {
        LocaleOptions {
            locales: self.supported_locales.clone(),
            default_locale: self.default_locale.clone(),
            directory: self.locales_dir.clone(),
            object_notation: true,
        }
    }
}

/// Parse a comma-separated locale list, trimming entries and dropping
/// empty ones.
fn parse_locale_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
