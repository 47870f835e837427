//! # Registration Form
//!
//! Runs every field rule over a [`FieldValues`] snapshot and produces a
//! [`ValidationResult`] that has an entry for every field, passed or not.
//!
//! ## Rules
//!
//! - `name`, `username`, `email`, `password` must not be blank.
//! - `confirm_password` must equal `password` exactly. This check runs
//!   even when `password` is blank, so a blank password with a non-blank
//!   confirmation reports both `EmptyPassword` and `PasswordMismatch`.
//!   Two blank passwords match; only `EmptyPassword` is reported.
//!
//! Each pass recomputes every entry from scratch. The form keeps no state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldValues};
use crate::request::RegistrationRequest;
use crate::validator::{validate_passwords_match, validate_required, ValidationError};

/// The outcome of one validation pass.
///
/// Always holds an entry for each of [`Field::ALL`]; `None` means the field
/// passed and any error previously displayed on it should be cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    entries: BTreeMap<Field, Option<ValidationError>>,
}

impl ValidationResult {
    /// True iff no field has an error.
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    /// The error on a field, if any.
    pub fn error_for(&self, field: Field) -> Option<ValidationError> {
        self.entries.get(&field).copied().flatten()
    }

    /// Present errors, in form order.
    pub fn errors(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.entries.values().filter_map(|e| *e)
    }

    /// Every field with its entry, in form order.
    pub fn entries(&self) -> impl Iterator<Item = (Field, Option<ValidationError>)> + '_ {
        self.entries.iter().map(|(f, e)| (*f, *e))
    }

    /// Number of fields with an error.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            return f.write_str("valid");
        }
        let tags: Vec<String> = self.errors().map(|e| e.to_string()).collect();
        write!(f, "{}", tags.join(", "))
    }
}

/// Stateless validator for the whole sign-up form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationForm;

impl RegistrationForm {
    pub fn new() -> Self {
        Self
    }

    /// Run one full validation pass.
    pub fn validate(&self, fields: &FieldValues) -> ValidationResult {
        let mut entries = BTreeMap::new();
        for field in [Field::Name, Field::Username, Field::Email, Field::Password] {
            entries.insert(field, validate_required(field, fields.value(field)));
        }
        entries.insert(
            Field::ConfirmPassword,
            validate_passwords_match(&fields.password, &fields.confirm_password),
        );

        let result = ValidationResult { entries };
        tracing::debug!(
            valid = result.is_valid(),
            errors = result.error_count(),
            "validated registration form"
        );
        result
    }

    /// Validate and, if every field passes, build the request to send.
    ///
    /// # Errors
    ///
    /// Returns the complete [`ValidationResult`] when any field fails.
    pub fn prepare(&self, fields: &FieldValues) -> Result<RegistrationRequest, ValidationResult> {
        let result = self.validate(fields);
        if !result.is_valid() {
            return Err(result);
        }
        Ok(RegistrationRequest::from_validated(fields))
    }
}
