//! API error types.

use thiserror::Error;

/// Errors that can occur when calling the SmartSkills API.
///
/// Every remote call resolves to one of these variants; no raw transport
/// failure crosses the client boundary untagged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The login exchange was rejected (HTTP 401).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The server rejected the request with a message meant for the user
    /// (HTTP 400 with a structured body).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Any other non-success HTTP status.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// The HTTP status returned.
        status: reqwest::StatusCode,
        /// Most specific message extractable from the response body, else
        /// the status line.
        message: String,
    },

    /// Network or protocol failure before a usable response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Inline text shown to the user next to the triggering action.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid email or password".to_owned(),
            Self::Rejected(message) | Self::Status { message, .. } => message.clone(),
            Self::Transport(_) => {
                "Unable to reach the SmartSkills service. Please try again.".to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_exact() {
        assert_eq!(
            ApiError::InvalidCredentials.user_message(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_rejected_surfaces_server_text() {
        let error = ApiError::Rejected("Email already registered".to_owned());
        assert_eq!(error.user_message(), "Email already registered");
    }
}
