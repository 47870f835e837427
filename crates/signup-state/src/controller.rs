//! # Registration Controller
//!
//! Owns the [`SubmissionState`] of the sign-up screen and is its only
//! writer. The UI hands it [`FieldValues`] snapshots, subscribes to its
//! [`ResultChannel`], and calls [`RegistrationController::acknowledge`]
//! once it has shown a terminal state.
//!
//! ## Transitions
//!
//! | From | Call / event | To | Otherwise |
//! |------|--------------|----|-----------|
//! | Idle | `submit` with valid fields | Submitting | `SubmitError::Invalid` |
//! | Submitting | service success | Succeeded(msg) | |
//! | Submitting | service failure | Failed(msg) | |
//! | Submitting | `submit` | — | `SubmitError::InFlight` |
//! | Succeeded / Failed | `submit` | — | `SubmitError::AwaitingAcknowledgement` |
//! | Succeeded / Failed | `acknowledge` | Idle | |
//! | Idle / Submitting | `acknowledge` | — | `ControllerError::InvalidTransition` |
//!
//! Entering `Submitting` spawns exactly one [`AccountService::register`]
//! call on the current tokio runtime; `submit` returns as soon as it is
//! spawned. Entering a terminal state publishes once to the channel. The
//! call is never retried or cancelled.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;

use signup_core::{
    AccountService, FieldValues, RegistrationForm, RegistrationOutcome, Timestamp,
    ValidationResult,
};

use crate::channel::ResultChannel;
use crate::state::{SubmissionPhase, SubmissionState, SubmissionTransitionRecord};

// ─── Errors ──────────────────────────────────────────────────────────

/// Why a `submit()` was refused. The controller state is unchanged.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// One or more fields failed validation. Carries every field's entry.
    #[error("registration form is invalid: {0}")]
    Invalid(ValidationResult),

    /// An attempt is already waiting on the account service.
    #[error("a registration attempt is already in flight")]
    InFlight,

    /// The previous attempt's outcome has not been acknowledged yet.
    #[error("previous attempt ended {state}; acknowledge it before submitting again")]
    AwaitingAcknowledgement {
        /// The terminal phase the controller is sitting in.
        state: SubmissionPhase,
    },

    /// `submit()` was called outside a tokio runtime.
    #[error("no async runtime available to run the registration call")]
    NoRuntime,
}

/// Errors from controller operations other than `submit()`.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// Attempted transition is not valid from the current state.
    #[error("invalid submission transition: {from} -> {to}")]
    InvalidTransition {
        from: SubmissionPhase,
        to: SubmissionPhase,
    },

    /// The background task running the attempt could not be joined.
    #[error("registration task failed: {0}")]
    TaskFailed(String),
}

// ─── Handle ──────────────────────────────────────────────────────────

/// Handle to a spawned attempt.
///
/// Awaiting it is optional: dropping the handle does not cancel the call,
/// and the outcome is published to the channel either way.
#[derive(Debug)]
pub struct SubmissionHandle {
    attempt: u64,
    task: JoinHandle<SubmissionState>,
}

impl SubmissionHandle {
    /// 1-based number of this attempt within the controller's lifetime.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Wait for the attempt to reach its terminal state.
    pub async fn resolved(self) -> Result<SubmissionState, ControllerError> {
        self.task
            .await
            .map_err(|e| ControllerError::TaskFailed(e.to_string()))
    }
}

// ─── Controller ──────────────────────────────────────────────────────

/// Transition records kept by a controller; older ones are dropped.
pub const HISTORY_LIMIT: usize = 64;

struct Machine {
    state: SubmissionState,
    attempt: u64,
    transitions: VecDeque<SubmissionTransitionRecord>,
}

impl Machine {
    fn transition(&mut self, to: SubmissionState) {
        if self.transitions.len() == HISTORY_LIMIT {
            self.transitions.pop_front();
        }
        self.transitions.push_back(SubmissionTransitionRecord {
            from: self.state.phase(),
            to: to.phase(),
            attempt: self.attempt,
            timestamp: Timestamp::now(),
        });
        self.state = to;
    }
}

struct Shared {
    machine: Mutex<Machine>,
    channel: ResultChannel,
}

impl Shared {
    /// Move the in-flight attempt to its terminal state and publish it.
    fn resolve(&self, attempt: u64, outcome: RegistrationOutcome) -> SubmissionState {
        let state = if outcome.success {
            SubmissionState::Succeeded(outcome.message)
        } else {
            SubmissionState::Failed(outcome.message)
        };

        // Slot and machine change together, under the machine lock.
        let delivery = {
            let mut machine = self.machine.lock();
            if machine.state != SubmissionState::Submitting || machine.attempt != attempt {
                // Unreachable while submit() enforces a single attempt in flight.
                tracing::error!(
                    attempt,
                    current = %machine.state,
                    "dropping outcome for an attempt that is not in flight"
                );
                return state;
            }
            machine.transition(state.clone());
            self.channel.store(state.clone())
        };

        match &state {
            SubmissionState::Succeeded(_) => tracing::info!(attempt, "registration succeeded"),
            _ => tracing::warn!(attempt, state = %state, "registration failed"),
        }
        if let Some(delivery) = delivery {
            self.channel.deliver(delivery);
        }
        state
    }
}

/// Submission state machine for one sign-up screen.
pub struct RegistrationController {
    form: RegistrationForm,
    service: Arc<dyn AccountService>,
    shared: Arc<Shared>,
}

impl RegistrationController {
    /// Create a controller in `Idle`.
    pub fn new(service: Arc<dyn AccountService>) -> Self {
        Self {
            form: RegistrationForm::new(),
            service,
            shared: Arc::new(Shared {
                machine: Mutex::new(Machine {
                    state: SubmissionState::Idle,
                    attempt: 0,
                    transitions: VecDeque::with_capacity(HISTORY_LIMIT),
                }),
                channel: ResultChannel::new(),
            }),
        }
    }

    /// Validate `fields` and, if valid and idle, start an attempt.
    ///
    /// Returns immediately after the `Idle → Submitting` transition; the
    /// account-service call runs on a spawned task.
    ///
    /// # Errors
    ///
    /// See [`SubmitError`]. On error no transition happens and no call is made.
    pub fn submit(&self, fields: &FieldValues) -> Result<SubmissionHandle, SubmitError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SubmitError::NoRuntime)?;

        let (request, attempt) = {
            let mut machine = self.shared.machine.lock();
            match machine.state.phase() {
                SubmissionPhase::Idle => {}
                SubmissionPhase::Submitting => {
                    tracing::warn!(attempt = machine.attempt, "rejected submit while in flight");
                    return Err(SubmitError::InFlight);
                }
                phase @ (SubmissionPhase::Succeeded | SubmissionPhase::Failed) => {
                    tracing::warn!(
                        attempt = machine.attempt,
                        state = %phase,
                        "rejected submit before acknowledgement"
                    );
                    return Err(SubmitError::AwaitingAcknowledgement { state: phase });
                }
            }

            let request = self.form.prepare(fields).map_err(|result| {
                tracing::debug!(errors = %result, "submit refused by validation");
                SubmitError::Invalid(result)
            })?;

            machine.attempt += 1;
            machine.transition(SubmissionState::Submitting);
            (request, machine.attempt)
        };

        tracing::info!(attempt, username = request.username(), "registration submitted");

        let service = Arc::clone(&self.service);
        let shared = Arc::clone(&self.shared);
        let task = runtime.spawn(async move {
            // The call runs in its own task so a panicking service still
            // resolves the attempt instead of leaving it in flight.
            let call = tokio::spawn(async move { service.register(&request).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(attempt, "account service call aborted: {e}");
                    RegistrationOutcome::failed(format!("registration call aborted: {e}"))
                }
            };
            shared.resolve(attempt, outcome)
        });

        Ok(SubmissionHandle { attempt, task })
    }

    /// Return from a terminal state to `Idle` and clear the channel slot.
    ///
    /// # Errors
    ///
    /// [`ControllerError::InvalidTransition`] from `Idle` or `Submitting`.
    pub fn acknowledge(&self) -> Result<(), ControllerError> {
        {
            let mut machine = self.shared.machine.lock();
            if !machine.state.is_terminal() {
                return Err(ControllerError::InvalidTransition {
                    from: machine.state.phase(),
                    to: SubmissionPhase::Idle,
                });
            }
            tracing::debug!(attempt = machine.attempt, state = %machine.state, "acknowledged");
            machine.transition(SubmissionState::Idle);
            self.shared.channel.clear();
        }
        Ok(())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.shared.machine.lock().state.clone()
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.shared.machine.lock().attempt
    }

    /// The most recent transitions, oldest first, at most [`HISTORY_LIMIT`].
    pub fn history(&self) -> Vec<SubmissionTransitionRecord> {
        self.shared.machine.lock().transitions.iter().cloned().collect()
    }

    /// The channel terminal states are published to.
    pub fn channel(&self) -> &ResultChannel {
        &self.shared.channel
    }

    /// Run a validation pass without touching controller state.
    pub fn validate(&self, fields: &FieldValues) -> ValidationResult {
        self.form.validate(fields)
    }
}

impl std::fmt::Debug for RegistrationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let machine = self.shared.machine.lock();
        f.debug_struct("RegistrationController")
            .field("state", &machine.state)
            .field("attempt", &machine.attempt)
            .field("channel", &self.shared.channel)
            .finish()
    }
}
