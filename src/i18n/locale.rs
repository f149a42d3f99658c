//! Locale type: normalized language tag representation.
//!
//! A [`Locale`] is a lowercase language tag such as `en` or `pt-br`. It does
//! not guarantee the locale is supported by the running service; matching
//! against the configured set happens in the manager.

use std::fmt;

/// A normalized locale code (e.g., "en", "fr", "en-us").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a raw tag.
    ///
    /// Normalization: surrounding whitespace is trimmed, `_` separators are
    /// replaced with `-`, and the tag is lowercased, so `en_US`, ` EN-us`
    /// and `en-us` all compare equal.
    pub fn new(tag: &str) -> Locale {
        Locale(tag.trim().replace('_', "-").to_lowercase())
    }

    /// The locale code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (e.g., "en" for "en-us").
    pub fn primary_subtag(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
