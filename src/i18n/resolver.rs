//! Per-request locale resolution.
//!
//! Resolution precedence, checked in order until a supported locale turns
//! up:
//!
//! 1. `lang` query parameter (explicit override)
//! 2. `lang` cookie
//! 3. `Accept-Language` header, in quality order
//! 4. the configured default locale
//!
//! Unsupported candidates at a step are skipped rather than treated as
//! errors, so a request asking for `de` on a service that only speaks
//! `en`/`fr` keeps falling through the chain.

use std::cmp::Ordering;
use std::sync::OnceLock;

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use regex::Regex;

use crate::i18n::locale::Locale;
use crate::i18n::manager::LocalizationManager;

/// Query parameter and cookie name carrying an explicit locale override.
pub const LANG_PARAM: &str = "lang";

static LANGUAGE_RANGE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Resolve the locale for one request.
pub fn resolve_request_locale(
    manager: &LocalizationManager,
    query: Option<&str>,
    headers: &HeaderMap,
) -> Locale {
    for candidate in candidates(query, headers) {
        if let Some(locale) = manager.match_supported(&Locale::new(&candidate)) {
            return locale;
        }
    }
    manager.default_locale().clone()
}

/// All locale candidates for a request, in precedence order.
fn candidates(query: Option<&str>, headers: &HeaderMap) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(tag) = query_override(query) {
        candidates.push(tag);
    }
    if let Some(tag) = cookie_override(headers) {
        candidates.push(tag);
    }
    candidates.extend(accepted_languages(headers));
    candidates
}

/// The `lang` parameter from a raw query string, if present and non-empty.
fn query_override(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == LANG_PARAM && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The `lang` cookie value, if present and non-empty.
fn cookie_override(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(LANG_PARAM)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Language tags from the `Accept-Language` header, highest quality first.
///
/// Ties keep the listed order (stable sort); `*` and `q=0` ranges are
/// dropped. Malformed ranges are skipped rather than failing the request.
fn accepted_languages(headers: &HeaderMap) -> Vec<String> {
    let Some(value) = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
    else {
        return Vec::new();
    };

    let regex = LANGUAGE_RANGE_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{1,8}(?:-[A-Za-z0-9]{1,8})*|\*)(?:;q=([0-9]*\.?[0-9]+))?$")
            .expect("language range regex")
    });

    let mut ranges: Vec<(String, f32)> = value
        .split(',')
        .filter_map(|part| {
            let compact: String = part.chars().filter(|c| !c.is_whitespace()).collect();
            let captures = regex.captures(&compact)?;
            let tag = captures.get(1)?.as_str();
            if tag == "*" {
                return None;
            }
            let quality = captures
                .get(2)
                .and_then(|q| q.as_str().parse::<f32>().ok())
                .unwrap_or(1.0);
            if quality <= 0.0 {
                return None;
            }
            Some((tag.to_string(), quality))
        })
        .collect();

    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranges.into_iter().map(|(tag, _)| tag).collect()
}
