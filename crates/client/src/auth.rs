//! Login and registration submitters.
//!
//! Both issue exactly one request per call and feed the session store on
//! success. Field-level validation happens before these are called, and
//! callers prevent duplicate submission while a call is in flight; see
//! [`smartskills_core::Email`] for the email check.

use secrecy::SecretString;

use smartskills_core::Identity;

use crate::api::{ApiClient, ApiError, Registration};
use crate::session::SessionStore;

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Account created and a session established via auto-login.
    SignedIn(Identity),
    /// Account created, but the follow-up login failed; no session.
    Created,
}

/// Drives the login and registration exchanges against the remote API.
pub struct Authenticator {
    api: ApiClient,
    session: SessionStore,
}

impl Authenticator {
    /// Create a new authenticator.
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Exchange credentials for a bearer token and establish the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] on a 401; other failures
    /// keep their classification from the API boundary. The session is
    /// untouched on any failure.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, ApiError> {
        let identity = self.api.create_token(email, password).await?;

        if let Err(error) = self.session.establish(identity.clone()) {
            tracing::warn!(%error, "session established in memory only");
        }

        Ok(identity)
    }

    /// Create an account, then try to sign the new user in.
    ///
    /// The auto-login is a convenience, not part of a transaction: its
    /// failure is logged and the registration still reports success.
    ///
    /// # Errors
    ///
    /// Only the registration call itself can fail; see
    /// [`ApiClient::create_user`] for the 400 classification.
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<RegistrationOutcome, ApiError> {
        self.api.create_user(registration).await?;

        match self.login(&registration.email, &registration.password).await {
            Ok(identity) => Ok(RegistrationOutcome::SignedIn(identity)),
            Err(error) => {
                tracing::warn!(%error, "registration succeeded but auto-login failed");
                Ok(RegistrationOutcome::Created)
            }
        }
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns the storage failure when the durable entry could not be
    /// deleted; the in-memory session is cleared regardless.
    pub fn logout(&self) -> Result<(), crate::session::StorageError> {
        self.session.clear()
    }
}
