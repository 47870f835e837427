//! Account service client configuration.
//!
//! One base URL, an optional bearer token, and a request timeout. Load from
//! the environment with [`AccountApiConfig::from_env`] or build directly for
//! staging and tests.

use url::Url;
use zeroize::Zeroizing;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the account service.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct AccountApiConfig {
    /// Base URL of the account service; `/register` is resolved against it.
    pub base_url: Url,
    /// Bearer token, if the deployment requires one for registration.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AccountApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AccountApiConfig {
    /// Configuration for `base_url` with no token and the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SIGNUP_API_URL` (required)
    /// - `SIGNUP_API_TOKEN` (optional)
    /// - `SIGNUP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("SIGNUP_API_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        let base_url = parse_url("SIGNUP_API_URL", &raw)?;
        Ok(Self::from_env_with_base_url(base_url))
    }

    /// Like [`from_env`](Self::from_env) but with an explicit base URL, so
    /// `SIGNUP_API_URL` is not consulted.
    pub fn from_env_with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: std::env::var("SIGNUP_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .map(Zeroizing::new),
            timeout_secs: std::env::var("SIGNUP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let base_url = parse_url("localhost", &format!("http://127.0.0.1:{port}"))?;
        Ok(Self {
            base_url,
            api_token: None,
            timeout_secs: 5,
        })
    }
}

/// Parse `raw` as a URL, reporting `source` on failure.
pub fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SIGNUP_API_URL environment variable is required")]
    MissingBaseUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,
}
