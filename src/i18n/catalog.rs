//! Locale catalog store: per-locale phrase tables loaded from disk.
//!
//! One JSON file per supported locale lives in the catalog directory
//! (`<code>.json`). With object notation enabled, nested objects are
//! flattened into dot-joined phrase keys at load time, so lookups are a
//! single flat-map read on the request path.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::i18n::locale::Locale;
use crate::i18n::manager::LocaleError;

/// Flat phrase-key to localized-string table for one locale.
pub type PhraseTable = BTreeMap<String, String>;

/// Read-only store of all loaded catalogs, shared across requests.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: BTreeMap<Locale, PhraseTable>,
}

impl CatalogStore {
    /// Load one catalog per locale from `directory`.
    ///
    /// A missing file leaves that locale with an empty catalog (lookups
    /// then fall back per the manager's rules). A missing directory or an
    /// unreadable/malformed file is a configuration error and aborts
    /// startup.
    pub fn load(
        directory: &Path,
        locales: &[Locale],
        object_notation: bool,
    ) -> Result<CatalogStore, LocaleError> {
        if !directory.is_dir() {
            return Err(LocaleError::CatalogDirectory(directory.to_path_buf()));
        }

        let mut catalogs = BTreeMap::new();
        for locale in locales {
            let path = directory.join(format!("{}.json", locale));
            let table = if path.is_file() {
                let raw = fs::read_to_string(&path).map_err(|source| LocaleError::CatalogRead {
                    path: path.clone(),
                    source,
                })?;
                let value: Value =
                    serde_json::from_str(&raw).map_err(|source| LocaleError::CatalogParse {
                        path: path.clone(),
                        source,
                    })?;
                parse_table(value, object_notation)
            } else {
                warn!(locale = %locale, path = %path.display(), "no catalog file for locale");
                PhraseTable::new()
            };
            catalogs.insert(locale.clone(), table);
        }

        Ok(CatalogStore { catalogs })
    }

    /// Look up the phrase for `key` in `locale`'s catalog.
    pub fn phrase(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.catalogs
            .get(locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// The full phrase table for `locale`, if that locale was loaded.
    pub fn table(&self, locale: &Locale) -> Option<&PhraseTable> {
        self.catalogs.get(locale)
    }
}

/// Turn a parsed catalog document into a flat phrase table.
fn parse_table(value: Value, object_notation: bool) -> PhraseTable {
    let mut table = PhraseTable::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                collect_phrases(&mut table, key, value, object_notation);
            }
        }
        other => {
            warn!("catalog root is not an object, ignoring: {}", other);
        }
    }
    table
}

fn collect_phrases(table: &mut PhraseTable, key: String, value: Value, object_notation: bool) {
    match value {
        Value::String(phrase) => {
            table.insert(key, phrase);
        }
        Value::Object(nested) if object_notation => {
            for (child, value) in nested {
                collect_phrases(table, format!("{}.{}", key, child), value, object_notation);
            }
        }
        other => {
            warn!(key = %key, "ignoring non-string catalog entry: {}", other);
        }
    }
}
