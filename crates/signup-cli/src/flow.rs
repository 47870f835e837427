//! # Registration Flow
//!
//! Drives one registration from parsed flags to an exit status: gate on the
//! terms flag, validate, submit through [`RegistrationController`], wait
//! for the outcome on the result channel, print it, acknowledge.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use signup_client::{config::parse_url, AccountApiConfig, ConfigError};
use signup_core::{AccountService, RegistrationForm, ValidationResult};
use signup_state::{RegistrationController, SubmissionState, SubmitError};

use crate::args::{RegisterArgs, ValidateArgs};
use crate::messages;

/// Registration succeeded or the form is valid.
pub const EXIT_SUCCESS: u8 = 0;
/// Validation failed, terms were not accepted, or the service refused.
pub const EXIT_FAILURE: u8 = 1;

/// Resolve the account service configuration, preferring `--api-url`.
pub fn load_config(api_url: Option<&str>) -> Result<AccountApiConfig, ConfigError> {
    match api_url {
        Some(raw) => Ok(AccountApiConfig::from_env_with_base_url(parse_url(
            "--api-url",
            raw,
        )?)),
        None => AccountApiConfig::from_env(),
    }
}

/// Print one line per field error, in field order.
pub fn render_errors(result: &ValidationResult, out: &mut impl Write) -> std::io::Result<()> {
    for error in result.errors() {
        writeln!(
            out,
            "{}: {}",
            messages::field_label(error.field()),
            messages::validation_message(error)
        )?;
    }
    Ok(())
}

/// Validate the form without contacting the account service.
pub fn check(args: &ValidateArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let result = RegistrationForm::new().validate(&args.form.to_fields(false));
    if result.is_valid() {
        writeln!(out, "Form is valid.")?;
        return Ok(EXIT_SUCCESS);
    }
    render_errors(&result, out)?;
    Ok(EXIT_FAILURE)
}

/// Run a full registration against `service`.
pub async fn register(
    args: &RegisterArgs,
    service: Arc<dyn AccountService>,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    if !args.accept_terms {
        tracing::warn!("registration refused: terms not accepted");
        writeln!(out, "{}", messages::TERMS_REQUIRED)?;
        return Ok(EXIT_FAILURE);
    }

    let controller = RegistrationController::new(service);
    let (tx, mut rx) = mpsc::unbounded_channel();
    controller
        .channel()
        .subscribe(move |state: &SubmissionState| {
            let _ = tx.send(state.clone());
        });

    let handle = match controller.submit(&args.form.to_fields(true)) {
        Ok(handle) => handle,
        Err(SubmitError::Invalid(result)) => {
            render_errors(&result, out)?;
            return Ok(EXIT_FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    writeln!(out, "{}", messages::SIGNING_UP)?;

    let attempt = handle.attempt();
    let state = rx
        .recv()
        .await
        .context("result channel closed before the registration resolved")?;
    tracing::debug!(attempt, state = %state, "registration outcome received");

    writeln!(out, "{}", messages::state_message(&state))?;
    controller.acknowledge()?;

    Ok(match state {
        SubmissionState::Succeeded(_) => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
    })
}
