//! Request middleware: the locale binder and the validation error
//! translator.

pub mod locale;
pub mod validation;

pub use locale::RequestLocalizer;
pub use validation::{translate_validation_failure, ResponseErrorMessage};
