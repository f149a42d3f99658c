//! Localization subsystem.
//!
//! All locale state, catalog loading, and translation lookup lives here.
//!
//! # Architecture
//!
//! - `locale`: normalized language-tag type
//! - `catalog`: per-locale phrase tables loaded from JSON files at startup
//! - `manager`: process-wide manager owning configuration, catalogs, and
//!   the ambient locale
//! - `resolver`: per-request locale resolution (query, cookie,
//!   `Accept-Language`, default)
//!
//! # Example
//!
//! ```rust,ignore
//! use polyglot_api::i18n::{LocaleOptions, LocalizationManager};
//!
//! let manager = LocalizationManager::global_with(LocaleOptions::default())?;
//! let phrase = manager.translate("healthCheck");
//! ```

pub mod catalog;
pub mod locale;
pub mod manager;
pub mod resolver;

pub use locale::Locale;
pub use manager::{LocaleError, LocaleOptions, LocalizationManager};
