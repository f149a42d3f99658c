//! Web-service scaffold with localized responses and validated input.
//!
//! The interesting part is the localization subsystem (`i18n`): a
//! process-wide translation manager, a per-request locale binder, and a
//! middleware that rewrites structured validation failures into localized
//! error payloads. Routes and the rest of the wiring are a thin shell
//! around it.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;
