//! # Registration Fields
//!
//! [`Field`] names the five text inputs of the sign-up form and
//! [`FieldValues`] is the snapshot of all of them, plus the preference
//! flags, taken when the user presses submit. The snapshot is passed by
//! reference into validation and consumed into a request; nothing in the
//! flow keeps mutable copies of individual inputs.

use serde::{Deserialize, Serialize};

use crate::validator::ValidationError;

/// A named text input of the sign-up form.
///
/// Ordering follows the on-screen order, which is also the order in
/// which [`crate::ValidationResult::errors`] yields errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Username,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// The error reported when this field is blank, if the field is required.
    ///
    /// `ConfirmPassword` has no emptiness rule of its own; it is only
    /// checked against `Password`.
    pub fn empty_error(&self) -> Option<ValidationError> {
        match self {
            Self::Name => Some(ValidationError::EmptyName),
            Self::Username => Some(ValidationError::EmptyUsername),
            Self::Email => Some(ValidationError::EmptyEmail),
            Self::Password => Some(ValidationError::EmptyPassword),
            Self::ConfirmPassword => None,
        }
    }

    /// Wire/config name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of everything the user entered on the sign-up form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub needs_mentoring: bool,
    pub available_to_mentor: bool,
    /// Whether the terms and conditions box was ticked. Gating on this is
    /// up to the UI; the core only forwards it.
    pub accepted_terms: bool,
}

impl FieldValues {
    /// The raw text of a named field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }
}

impl std::fmt::Debug for FieldValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldValues")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("needs_mentoring", &self.needs_mentoring)
            .field("available_to_mentor", &self.available_to_mentor)
            .field("accepted_terms", &self.accepted_terms)
            .finish()
    }
}
