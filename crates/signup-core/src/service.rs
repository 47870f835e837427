//! # Account Service Seam
//!
//! The async boundary between the submission state machine and whatever
//! actually creates the account. Transport, encoding, and retries live
//! behind it; the state machine only sees a [`RegistrationOutcome`].
//!
//! Implementations must be `Send + Sync` so they can be shared with the
//! task that runs the call, behind an `Arc<dyn AccountService>`.

use serde::{Deserialize, Serialize};

use crate::request::RegistrationRequest;

/// Result of one registration call as reported by the service.
///
/// `message` is opaque service text (e.g. "Username or password is wrong.")
/// and is passed through to the UI untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub success: bool,
    pub message: String,
}

impl RegistrationOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Remote account registration.
///
/// Failures of any kind (rejected credentials, network, server errors) are
/// reported as an outcome with `success == false`, never as a panic.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> RegistrationOutcome;
}
