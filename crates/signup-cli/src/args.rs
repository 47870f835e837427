//! # Command-Line Arguments
//!
//! Form fields arrive as flags. Missing text fields default to empty so the
//! validation pass reports them the same way a blank input box would.

use clap::Args;

use signup_core::FieldValues;

/// The registration form, one flag per field.
#[derive(Args, Clone, Default)]
pub struct FormArgs {
    /// Full name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Username to register.
    #[arg(long, default_value = "")]
    pub username: String,

    /// Email address.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Password.
    #[arg(long, default_value = "")]
    pub password: String,

    /// Password again, must match `--password` exactly.
    #[arg(long = "confirm-password", default_value = "")]
    pub confirm_password: String,

    /// Ask to be matched with a mentor.
    #[arg(long)]
    pub needs_mentoring: bool,

    /// Offer to mentor others.
    #[arg(long)]
    pub available_to_mentor: bool,
}

impl FormArgs {
    /// Snapshot the flags as form input.
    pub fn to_fields(&self, accepted_terms: bool) -> FieldValues {
        FieldValues {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            needs_mentoring: self.needs_mentoring,
            available_to_mentor: self.available_to_mentor,
            accepted_terms,
        }
    }
}

impl std::fmt::Debug for FormArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormArgs")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("needs_mentoring", &self.needs_mentoring)
            .field("available_to_mentor", &self.available_to_mentor)
            .finish()
    }
}

/// Arguments for the register subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Accept the terms and conditions. Registration is refused without it.
    #[arg(long)]
    pub accept_terms: bool,

    /// Account service base URL. Overrides `SIGNUP_API_URL`.
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub form: FormArgs,
}
