//! # signup-cli -- Account registration from the command line
//!
//! Collects the registration form from flags and runs it through the
//! validation and submission pipeline.
//!
//! ## Subcommands
//!
//! - `register` -- Validate, submit to the account service, print the outcome
//! - `validate` -- Validate the form locally and list field errors
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in [`args`], display text in [`messages`].
//! - Validation and the submission state machine belong to the domain
//!   crates. This crate only wires them to a terminal.

pub mod args;
pub mod flow;
pub mod messages;
