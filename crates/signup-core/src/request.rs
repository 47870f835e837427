//! The validated registration request.

use serde::{Serialize, Serializer};
use zeroize::Zeroizing;

use crate::field::FieldValues;

/// What is sent to the account service.
///
/// Built only by [`crate::RegistrationForm::prepare`], so holding one means
/// the snapshot it came from passed validation. The confirmation field is
/// dropped; the password is wiped from memory on drop.
///
/// Serializes to the account service's JSON shape:
///
/// ```json
/// {
///   "name": "...", "username": "...", "email": "...", "password": "...",
///   "accept_terms_and_conditions": true,
///   "need_mentoring": false, "available_to_mentor": true
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    name: String,
    username: String,
    email: String,
    #[serde(serialize_with = "expose_secret")]
    password: Zeroizing<String>,
    accept_terms_and_conditions: bool,
    need_mentoring: bool,
    available_to_mentor: bool,
}

impl RegistrationRequest {
    pub(crate) fn from_validated(fields: &FieldValues) -> Self {
        Self {
            name: fields.name.clone(),
            username: fields.username.clone(),
            email: fields.email.clone(),
            password: Zeroizing::new(fields.password.clone()),
            accept_terms_and_conditions: fields.accepted_terms,
            need_mentoring: fields.needs_mentoring,
            available_to_mentor: fields.available_to_mentor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn accepted_terms(&self) -> bool {
        self.accept_terms_and_conditions
    }

    pub fn needs_mentoring(&self) -> bool {
        self.need_mentoring
    }

    pub fn available_to_mentor(&self) -> bool {
        self.available_to_mentor
    }
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("accept_terms_and_conditions", &self.accept_terms_and_conditions)
            .field("need_mentoring", &self.need_mentoring)
            .field("available_to_mentor", &self.available_to_mentor)
            .finish()
    }
}

fn expose_secret<S: Serializer>(secret: &Zeroizing<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.as_str())
}
