//! # signup-client -- Typed Rust client for the account service
//!
//! The HTTP side of account registration. [`AccountClient`] posts a
//! validated [`signup_core::RegistrationRequest`] to `/register` and
//! implements [`signup_core::AccountService`], mapping every failure
//! (transport, non-2xx, malformed body) to a failed outcome whose message
//! is the service's own text where it sent one.
//!
//! ## Architecture
//!
//! Single attempt per call. Timeouts come from [`AccountApiConfig`]; there
//! is no retry or backoff layer.

pub mod accounts;
pub mod config;
pub mod error;

pub use accounts::{AccountClient, RegisterResponse};
pub use config::{AccountApiConfig, ConfigError};
pub use error::AccountApiError;

use std::time::Duration;

impl AccountClient {
    /// Create a new account service client from configuration.
    pub fn new(config: AccountApiConfig) -> Result<Self, AccountApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| AccountApiError::Config(ConfigError::InvalidToken))?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| AccountApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        tracing::debug!(base_url = %config.base_url, "account service client ready");
        Ok(Self::with_http(http, &config.base_url))
    }
}
