use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{0600}-\x{06FF}a-zA-ZÀ-ÿ\s]+$").unwrap());
static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 150;
const MESSAGE_MAX: usize = 1000;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` count as not provided.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// A submitted field that must be a non-empty string. Emptiness is checked
/// before trimming, so whitespace alone reaches the later rules.
fn required(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

fn validate_name(value: &Value) -> Result<(), ValidationError> {
    let Some(name) = required(value) else {
        return Err(error("name_required", "Le nom est requis"));
    };

    let name = name.trim();
    let len = name.chars().count();

    if len < NAME_MIN {
        return Err(error(
            "name_too_short",
            "Le nom est trop court (minimum 2 caractères)",
        ));
    }

    if len > NAME_MAX {
        return Err(error(
            "name_too_long",
            "Le nom est trop long (maximum 100 caractères)",
        ));
    }

    if !RE_NAME.is_match(name) {
        return Err(error(
            "name_letters",
            "Le nom doit contenir uniquement des lettres",
        ));
    }

    Ok(())
}

fn validate_email(value: &Value) -> Result<(), ValidationError> {
    let Some(email) = required(value) else {
        return Err(error("email_required", "L'email est requis"));
    };

    let email = email.trim().to_lowercase();

    if !RE_EMAIL.is_match(&email) {
        return Err(error("email_format", "Le format de l'email est incorrect"));
    }

    if email.chars().count() > EMAIL_MAX {
        return Err(error("email_too_long", "L'email est trop long"));
    }

    Ok(())
}

fn validate_message(value: &Value) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Ok(());
    }

    let Some(message) = value.as_str() else {
        return Err(error("message_text", "Le message doit être un texte"));
    };

    if message.trim().chars().count() > MESSAGE_MAX {
        return Err(error(
            "message_too_long",
            "Le message est trop long (maximum 1000 caractères)",
        ));
    }

    Ok(())
}

/// Raw registration as submitted by a visitor.
///
/// Fields keep their JSON shape until validation: a missing or `null` field
/// is reported as required rather than rejected as a malformed body.
/// Fields are checked in declaration order; only the first failing
/// field is reported back, see [`first_message`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterInput {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: Value,
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: Value,
    #[serde(default)]
    #[validate(custom(function = "validate_message"))]
    pub message: Value,
}

/// Registration after validation: trimmed, e-mail lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl RegisterInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Value::String(name.into()),
            email: Value::String(email.into()),
            message: Value::String(message.into()),
        }
    }

    pub fn normalize(self) -> Result<Registration, ValidationErrors> {
        self.validate()?;

        Ok(Registration {
            name: text(&self.name).trim().to_owned(),
            email: text(&self.email).trim().to_lowercase(),
            message: text(&self.message).trim().to_owned(),
        })
    }
}

/// Message of the first failing field, in the order name, email, message.
pub fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    ["name", "email", "message"]
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .filter_map(|errors| errors.first())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Données invalides".to_owned())
}
