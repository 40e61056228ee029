//! SmartSkills HTTP API client.
//!
//! Wraps the remote endpoints the authentication front end consumes: token
//! creation (login), account creation, and the password-reset trio. Error
//! classification happens here, at the boundary: every method resolves to a
//! tagged [`ApiError`] and nothing panics or re-throws a raw transport
//! failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use smartskills_client::api::ApiClient;
//! use smartskills_client::config::ApiConfig;
//!
//! let client = ApiClient::new(&ApiConfig::from_env()?);
//! let identity = client.create_token("user@example.com", &password).await?;
//! ```

mod error;
mod types;

pub use error::ApiError;
pub use types::{CodeVerification, Registration};

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use smartskills_core::Identity;

use crate::config::ApiConfig;
use types::{PasswordUpdate, SendCodeRequest, TokenRequest, TokenResponse, VerifyCodeRequest};

/// Client for the SmartSkills REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                timeout: config.timeout,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Login
    // ─────────────────────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token (`POST /users/token/create`).
    ///
    /// Both observed response shapes are accepted; see the response types
    /// for details. The returned identity carries the email echoed by the
    /// server when present, else the submitted one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] on HTTP 401; other failures
    /// carry the most specific message extractable from the body.
    pub async fn create_token(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, ApiError> {
        let url = self.endpoint("users/token/create");
        tracing::debug!(%url, "requesting access token");

        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&TokenRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidCredentials);
        }
        let response = Self::ensure_success(response).await?;

        let token: TokenResponse = response.json().await?;
        Ok(token.into_identity(email))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────

    /// Create an account (`POST /users/`).
    ///
    /// # Errors
    ///
    /// A 400 response surfaces the server's message when the body carries
    /// one (duplicate email is the common case), else generic registration
    /// guidance. Other failures keep their boundary classification.
    pub async fn create_user(&self, registration: &Registration) -> Result<(), ApiError> {
        let url = self.endpoint("users/");
        tracing::debug!(%url, email = %registration.email, "creating account");

        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&registration.body())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            let message = extract_message(&body)
                .unwrap_or_else(|| "Please check your registration details.".to_owned());
            return Err(ApiError::Rejected(message));
        }

        Err(Self::status_error(status, response).await)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Password reset
    // ─────────────────────────────────────────────────────────────────────

    /// Request a reset code for an account (`POST /auth/send-reset-code/`).
    ///
    /// # Errors
    ///
    /// Any non-success response or transport failure.
    pub async fn send_reset_code(&self, email: &str) -> Result<(), ApiError> {
        let url = self.endpoint("auth/send-reset-code/");
        tracing::debug!(%url, "requesting reset code");

        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&SendCodeRequest { email })
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Verify a previously sent reset code
    /// (`POST /auth/verify-reset-code/`).
    ///
    /// The response body is optional; an empty or unrecognized body yields
    /// a verification with no user id.
    ///
    /// # Errors
    ///
    /// Any non-success response or transport failure.
    pub async fn verify_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<CodeVerification, ApiError> {
        let url = self.endpoint("auth/verify-reset-code/");
        tracing::debug!(%url, "verifying reset code");

        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&VerifyCodeRequest { email, code })
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(CodeVerification::default());
        }
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// Set a new password for an account (`PATCH /users/{user_id}/`).
    ///
    /// # Errors
    ///
    /// Any non-success response or transport failure.
    pub async fn update_password(
        &self,
        user_id: &str,
        password: &SecretString,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("users/{user_id}/"));
        tracing::debug!(%url, "updating password");

        let response = self
            .inner
            .client
            .patch(&url)
            .timeout(self.inner.timeout)
            .json(&PasswordUpdate {
                password: password.expose_secret(),
            })
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Error classification
    // ─────────────────────────────────────────────────────────────────────

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Self::status_error(status, response).await)
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        ApiError::Status { status, message }
    }
}

/// Pull the most specific human-readable message out of an error body.
///
/// The backend is inconsistent about where it puts error text; these are
/// the shapes observed in the wild, most specific first.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["/error/details/message/0", "/error/message", "/message", "/detail"]
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))
        .map(str::to_owned)
}
