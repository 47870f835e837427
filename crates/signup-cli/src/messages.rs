//! User-facing text for validation errors and submission states.
//!
//! The core crates only deal in tags; every string a person reads is
//! chosen here.

use signup_core::{Field, ValidationError};
use signup_state::SubmissionState;

/// Printed when `--accept-terms` is missing.
pub const TERMS_REQUIRED: &str =
    "You must accept the terms and conditions to sign up (pass --accept-terms).";

/// Printed while the account service call is running.
pub const SIGNING_UP: &str = "Signing up...";

/// Label for a form field.
pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::Username => "Username",
        Field::Email => "Email",
        Field::Password => "Password",
        Field::ConfirmPassword => "Confirm password",
    }
}

/// Text for a validation error.
pub fn validation_message(error: ValidationError) -> &'static str {
    match error {
        ValidationError::EmptyName => "Name cannot be empty.",
        ValidationError::EmptyUsername => "Username cannot be empty.",
        ValidationError::EmptyEmail => "Email cannot be empty.",
        ValidationError::EmptyPassword => "Password cannot be empty.",
        ValidationError::PasswordMismatch => "Passwords do not match.",
    }
}

/// One line describing `state`. Service messages are shown verbatim.
pub fn state_message(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => "Ready.".to_string(),
        SubmissionState::Submitting => SIGNING_UP.to_string(),
        SubmissionState::Succeeded(message) | SubmissionState::Failed(message) => message.clone(),
    }
}
