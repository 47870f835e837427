//! Per-field validation rules.
//!
//! Pure functions of their inputs. Blank means empty after trimming
//! whitespace; the password comparison is exact, so `"abc "` and `"abc"`
//! are a mismatch.

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A validation failure tag, attached to exactly one field.
///
/// Tags carry no text. Turning them into user-facing strings is the UI's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    EmptyName,
    EmptyUsername,
    EmptyEmail,
    EmptyPassword,
    PasswordMismatch,
}

impl ValidationError {
    /// The field this error is displayed on.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyName => Field::Name,
            Self::EmptyUsername => Field::Username,
            Self::EmptyEmail => Field::Email,
            Self::EmptyPassword => Field::Password,
            Self::PasswordMismatch => Field::ConfirmPassword,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::EmptyUsername => "EMPTY_USERNAME",
            Self::EmptyEmail => "EMPTY_EMAIL",
            Self::EmptyPassword => "EMPTY_PASSWORD",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
        };
        f.write_str(s)
    }
}

/// Check that a required field is not blank.
///
/// Returns the field's empty-error tag when `value` is blank. Fields with no
/// emptiness rule never fail here.
pub fn validate_required(field: Field, value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        field.empty_error()
    } else {
        None
    }
}

/// Check that the confirmation is byte-for-byte the password.
pub fn validate_passwords_match(password: &str, confirm: &str) -> Option<ValidationError> {
    if password == confirm {
        None
    } else {
        Some(ValidationError::PasswordMismatch)
    }
}
