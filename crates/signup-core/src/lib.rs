//! # signup-core — Foundational Types for the Sign-Up Flow
//!
//! The leaf crate of the workspace. It defines the immutable field
//! snapshot a UI hands over on submit, the pure validation rules, the
//! registration form that turns a snapshot into a complete
//! [`ValidationResult`], and the validated [`RegistrationRequest`] that is
//! the only thing ever sent to the account service.
//!
//! ## Key Design Principles
//!
//! 1. **Validation is data.** Field errors are returned as a
//!    [`ValidationResult`] covering every field, never raised. Fields that
//!    passed are explicitly marked so a UI can clear stale error displays.
//!
//! 2. **Requests are proof of validity.** A [`RegistrationRequest`] has
//!    private fields and a single constructor, [`RegistrationForm::prepare`],
//!    which refuses invalid snapshots.
//!
//! 3. **The account service is a seam.** [`AccountService`] is the async
//!    boundary the state machine calls through; transports implement it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `signup-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Passwords never appear in `Debug` output.

pub mod field;
pub mod form;
pub mod request;
pub mod service;
pub mod temporal;
pub mod validator;

pub use field::{Field, FieldValues};
pub use form::{RegistrationForm, ValidationResult};
pub use request::RegistrationRequest;
pub use service::{AccountService, RegistrationOutcome};
pub use temporal::Timestamp;
pub use validator::ValidationError;
