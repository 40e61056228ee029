//! Session commands: login, logout, whoami.
//!
//! # Environment Variables
//!
//! - `SMARTSKILLS_API_BASE_URL` - Base URL of the SmartSkills API
//! - `SMARTSKILLS_SESSION_DIR` - Directory the session entry is persisted
//!   under

use secrecy::SecretString;
use thiserror::Error;

use smartskills_client::api::ApiClient;
use smartskills_client::auth::Authenticator;
use smartskills_client::config::{ApiConfig, ConfigError};
use smartskills_client::session::gate::{self, Access};
use smartskills_client::session::{FileStorage, SessionStore, StorageError};
use smartskills_core::{Email, EmailError};

/// Errors that can occur running CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Field-level validation failed; no call was made.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password field was left empty; no call was made.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// A remote call failed; the message is user-facing.
    #[error("{0}")]
    Api(String),

    /// No active session where one is required.
    #[error("not signed in - visit {0} first")]
    NotSignedIn(&'static str),

    /// The session entry could not be persisted or removed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Reading interactive input failed.
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}

/// Load configuration and open the persisted session.
pub(crate) fn open_session() -> Result<(ApiConfig, SessionStore), CommandError> {
    let config = ApiConfig::from_env()?;
    let session = SessionStore::open(FileStorage::new(&config.session_dir));
    Ok((config, session))
}

/// Sign in and persist the session.
pub async fn login(email: &str, password: String) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    if password.is_empty() {
        return Err(CommandError::EmptyPassword);
    }

    let (config, session) = open_session()?;
    let auth = Authenticator::new(ApiClient::new(&config), session);

    let identity = auth
        .login(email.as_str(), &SecretString::from(password))
        .await
        .map_err(|e| CommandError::Api(e.user_message()))?;

    tracing::info!("Signed in as {}", identity.email);
    Ok(())
}

/// End the current session.
pub fn logout() -> Result<(), CommandError> {
    let (_, session) = open_session()?;
    session.clear()?;
    tracing::info!("Signed out");
    Ok(())
}

/// Show the signed-in account; the CLI's protected surface.
pub fn whoami() -> Result<(), CommandError> {
    let (_, session) = open_session()?;

    match gate::check(&session) {
        Access::Granted => {
            if let Some(identity) = session.current() {
                tracing::info!("Signed in as {}", identity.email);
            }
            Ok(())
        }
        Access::Redirect(route) => Err(CommandError::NotSignedIn(route)),
    }
}
