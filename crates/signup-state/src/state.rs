//! # Submission State
//!
//! ```text
//! Idle ──submit()──▶ Submitting ──(service ok)────▶ Succeeded(message)
//!  ▲                     │                                │
//!  │                     └──(service failed)──▶ Failed(message)
//!  │                                                      │
//!  └──────────────────────acknowledge()───────────────────┘
//! ```
//!
//! `Succeeded` and `Failed` are terminal for the attempt: only
//! `acknowledge()` leaves them.

use serde::{Deserialize, Serialize};

use signup_core::Timestamp;

/// Where the current registration attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionState {
    /// No attempt running; `submit()` is accepted.
    Idle,
    /// The account-service call is in flight.
    Submitting,
    /// The service accepted the registration. Carries its message.
    Succeeded(String),
    /// The service rejected the registration or could not be reached.
    Failed(String),
}

impl SubmissionState {
    /// Whether this state ends an attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// The service message of a terminal state.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(m) | Self::Failed(m) => Some(m),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// The state without its payload.
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            Self::Idle => SubmissionPhase::Idle,
            Self::Submitting => SubmissionPhase::Submitting,
            Self::Succeeded(_) => SubmissionPhase::Succeeded,
            Self::Failed(_) => SubmissionPhase::Failed,
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded(m) | Self::Failed(m) => write!(f, "{}: {m}", self.phase()),
            Self::Idle | Self::Submitting => write!(f, "{}", self.phase()),
        }
    }
}

/// Payload-free tag of a [`SubmissionState`], used in records and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Submitting => "SUBMITTING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Record of one controller transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTransitionRecord {
    pub from: SubmissionPhase,
    pub to: SubmissionPhase,
    /// Attempt number the transition belongs to (1-based; 0 before the first submit).
    pub attempt: u64,
    pub timestamp: Timestamp,
}
