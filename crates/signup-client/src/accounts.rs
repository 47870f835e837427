//! Typed client for the account service registration endpoint.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/register` | Create a user account |
//!
//! Success is any 2xx with an optional `{"message": "..."}` body. Failures
//! carry the same shape with a 4xx/5xx status. Each call is a single
//! attempt; nothing here retries.

use serde::Deserialize;

use signup_core::{AccountService, RegistrationOutcome, RegistrationRequest};

use crate::error::AccountApiError;

/// Message used when a successful response has no body.
const DEFAULT_SUCCESS_MESSAGE: &str = "Account created.";

/// Body of a successful `POST /register`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the account service.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: reqwest::Client,
    base_url: String,
}

impl AccountClient {
    pub(crate) fn with_http(http: reqwest::Client, base_url: &url::Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Register a new account.
    ///
    /// Calls `POST {base_url}/register` with the request as JSON.
    pub async fn register_account(
        &self,
        req: &RegistrationRequest,
    ) -> Result<RegisterResponse, AccountApiError> {
        let endpoint = "POST /register";
        let url = format!("{}/register", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| AccountApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status, "account service rejected registration");
            return Err(AccountApiError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let body = resp.bytes().await.map_err(|e| AccountApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RegisterResponse::default());
        }
        serde_json::from_slice(&body).map_err(|e| AccountApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[async_trait::async_trait]
impl AccountService for AccountClient {
    async fn register(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        match self.register_account(request).await {
            Ok(resp) => RegistrationOutcome::succeeded(
                resp.message
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            ),
            Err(e) => {
                tracing::warn!("registration call failed: {e}");
                RegistrationOutcome::failed(e.user_message())
            }
        }
    }
}
