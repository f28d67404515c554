mod alert;
mod handler;
pub mod nav;
pub mod page;
mod submitter;
mod validation;

pub use alert::*;
pub use handler::*;
pub use submitter::*;
pub use validation::*;

rust_i18n::i18n!("locales", fallback = "en");

pub const SUPPORTED_LOCALES: [&str; 2] = ["fr", "en"];

pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Text shown when the endpoint cannot be reached or answers garbage.
pub fn connection_error(locale: &str) -> String {
    rust_i18n::t!("form.connection_error", locale = locale).to_string()
}
