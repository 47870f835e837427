//! Account service client error types.

use serde::Deserialize;

/// Errors from account service calls.
#[derive(Debug, thiserror::Error)]
pub enum AccountApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("account service {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error body the account service sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl AccountApiError {
    /// Text to show the user for this failure.
    ///
    /// For API errors this is the service's own `message` when the body
    /// carries one, else the raw body, else the status line.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { status, body, .. } => {
                if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
                    return parsed.message;
                }
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            }
            Self::Http { source, .. } if source.is_timeout() => "Request timed out.".to_string(),
            Self::Http { .. } => "Unable to reach the account service.".to_string(),
            Self::Deserialization { .. } => {
                "The account service sent an unexpected response.".to_string()
            }
            Self::Config(e) => e.to_string(),
        }
    }
}
