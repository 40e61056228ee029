//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults target a local development
//! backend.
//!
//! - `SMARTSKILLS_API_BASE_URL` - Base URL of the SmartSkills API
//!   (default: `http://localhost:8090/smartskills/v1`)
//! - `SMARTSKILLS_SESSION_DIR` - Directory holding the persisted session
//!   entry (default: `.smartskills`)
//! - `SMARTSKILLS_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8090/smartskills/v1";
const DEFAULT_SESSION_DIR: &str = ".smartskills";
const DEFAULT_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the remote SmartSkills API.
    pub base_url: Url,
    /// Directory the session entry is persisted under between runs.
    pub session_dir: PathBuf,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::build(
            &get_env_or_default("SMARTSKILLS_API_BASE_URL", DEFAULT_BASE_URL),
            &get_env_or_default("SMARTSKILLS_SESSION_DIR", DEFAULT_SESSION_DIR),
            &get_env_or_default("SMARTSKILLS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Configuration pointing at a specific base URL, with defaults for
    /// everything else.
    #[must_use]
    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            timeout: Duration::from_secs(30),
        }
    }

    fn build(base_url: &str, session_dir: &str, timeout_secs: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SMARTSKILLS_API_BASE_URL", e.to_string()))?;

        let timeout_secs = timeout_secs
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMARTSKILLS_TIMEOUT_SECS", e.to_string()))?;

        Ok(Self {
            base_url,
            session_dir: PathBuf::from(session_dir),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
