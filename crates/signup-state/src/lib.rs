//! # signup-state — Submission State Machine
//!
//! Governs one registration attempt from the moment the user presses
//! submit until the UI has shown the result.
//!
//! ## Components
//!
//! - **State** (`state.rs`): `Idle → Submitting → Succeeded | Failed`, plus
//!   the transition records the controller keeps.
//!
//! - **Result channel** (`channel.rs`): single-slot, single-subscriber
//!   observable that carries terminal states from the background task to
//!   whichever screen is currently watching.
//!
//! - **Controller** (`controller.rs`): validates, guards against duplicate
//!   submission, runs exactly one account-service call per attempt on the
//!   ambient tokio runtime, and publishes the outcome.
//!
//! ## Design
//!
//! At most one attempt is in flight. A second `submit()` while
//! `Submitting` is refused with a typed error and does not touch the
//! running attempt. Terminal states stay put until the UI calls
//! `acknowledge()`.

pub mod channel;
pub mod controller;
pub mod state;

pub use channel::{Observer, ResultChannel};
pub use controller::{
    ControllerError, RegistrationController, SubmissionHandle, SubmitError, HISTORY_LIMIT,
};
pub use state::{SubmissionPhase, SubmissionState, SubmissionTransitionRecord};
