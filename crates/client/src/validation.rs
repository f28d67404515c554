use std::sync::LazyLock;

use inscription_shared::InscriptionPayload;
use regex::Regex;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const MESSAGE_MIN: usize = 10;

/// Current values of the contact form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Trimmed field values, as read at submission time.
    pub fn payload(&self) -> InscriptionPayload {
        InscriptionPayload {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            message: self.message.trim().to_owned(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a field is empty")]
    EmptyField,
    #[error("email address is invalid")]
    InvalidEmail,
    #[error("message is too short")]
    MessageTooShort,
}

impl ValidationError {
    pub fn message(&self, locale: &str) -> String {
        let key = match self {
            Self::EmptyField => "form.fill_all_fields",
            Self::InvalidEmail => "form.invalid_email",
            Self::MessageTooShort => "form.message_too_short",
        };

        rust_i18n::t!(key, locale = locale).to_string()
    }
}

/// Check an already trimmed payload, stopping at the first failure.
pub fn validate(payload: &InscriptionPayload) -> Result<(), ValidationError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.message.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    if !RE_EMAIL.is_match(&payload.email) {
        return Err(ValidationError::InvalidEmail);
    }

    // Counted in UTF-16 code units, like the browser's `String.length`
    if payload.message.encode_utf16().count() < MESSAGE_MIN {
        return Err(ValidationError::MessageTooShort);
    }

    Ok(())
}
