//! Request and response types for the SmartSkills API.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use smartskills_core::Identity;

// ─────────────────────────────────────────────────────────────────────────────
// Token (login) exchange
// ─────────────────────────────────────────────────────────────────────────────

/// Body of the token-create (login) request.
#[derive(Debug, Serialize)]
pub(super) struct TokenRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw token response.
///
/// The backend has shipped two shapes for this endpoint: the current nested
/// form carrying `access_token` plus an optional `user` object, and a
/// legacy flat form with the token at the top level. Both are accepted; the
/// nested form is canonical.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum TokenResponse {
    Nested {
        access_token: String,
        #[allow(dead_code)]
        #[serde(default)]
        refresh_token: Option<String>,
        #[serde(default)]
        user: Option<TokenUser>,
    },
    Flat {
        token: String,
        #[serde(default)]
        email: Option<String>,
    },
}

/// User object embedded in the nested token response.
#[derive(Debug, Deserialize)]
pub(super) struct TokenUser {
    #[serde(default)]
    pub email: Option<String>,
}

impl TokenResponse {
    /// Extract the session identity, falling back to the submitted email
    /// when the response does not echo one.
    pub(super) fn into_identity(self, submitted_email: &str) -> Identity {
        match self {
            Self::Nested {
                access_token, user, ..
            } => {
                let email = user
                    .and_then(|user| user.email)
                    .unwrap_or_else(|| submitted_email.to_owned());
                Identity::new(email, access_token)
            }
            Self::Flat { token, email } => Identity::new(
                email.unwrap_or_else(|| submitted_email.to_owned()),
                token,
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Account-creation field set (`POST /users/`).
#[derive(Debug, Clone)]
pub struct Registration {
    /// Account email address.
    pub email: String,
    /// Chosen password.
    pub password: SecretString,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Sex, as the backend expects it.
    pub sex: String,
    /// Job title, if provided.
    pub title: Option<String>,
    /// Location, if provided.
    pub location: Option<String>,
}

impl Registration {
    pub(super) fn body(&self) -> RegistrationBody<'_> {
        RegistrationBody {
            email: &self.email,
            password: self.password.expose_secret(),
            first_name: &self.first_name,
            last_name: &self.last_name,
            sex: &self.sex,
            title: self.title.as_deref(),
            location: self.location.as_deref(),
        }
    }
}

/// Wire form of [`Registration`]; optional fields are omitted, not null.
#[derive(Debug, Serialize)]
pub(super) struct RegistrationBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub sex: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Password reset
// ─────────────────────────────────────────────────────────────────────────────

/// Body of the send-reset-code request.
#[derive(Debug, Serialize)]
pub(super) struct SendCodeRequest<'a> {
    pub email: &'a str,
}

/// Body of the verify-reset-code request.
#[derive(Debug, Serialize)]
pub(super) struct VerifyCodeRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

/// Response of the verify-reset-code endpoint.
///
/// The backend reports the id of the account the code belongs to; the
/// final reset step patches that account. An empty body deserializes to
/// `user_id: None`.
#[derive(Debug, Default, Deserialize)]
pub struct CodeVerification {
    /// Id of the account the verified code belongs to, when reported.
    #[serde(default, alias = "id")]
    pub user_id: Option<String>,
}

/// Body of the final password-update request.
#[derive(Debug, Serialize)]
pub(super) struct PasswordUpdate<'a> {
    pub password: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_nested_shape() {
        let raw = r#"{"access_token":"tok-1","refresh_token":"ref-1","user":{"email":"a@b.com"}}"#;
        let response: TokenResponse = serde_json::from_str(raw).unwrap();
        let identity = response.into_identity("submitted@example.com");
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.token, "tok-1");
    }

    #[test]
    fn test_token_response_nested_without_user_falls_back() {
        let raw = r#"{"access_token":"tok-2"}"#;
        let response: TokenResponse = serde_json::from_str(raw).unwrap();
        let identity = response.into_identity("submitted@example.com");
        assert_eq!(identity.email, "submitted@example.com");
        assert_eq!(identity.token, "tok-2");
    }

    #[test]
    fn test_token_response_flat_legacy_shape() {
        let raw = r#"{"email":"a@b.com","token":"legacy-tok"}"#;
        let response: TokenResponse = serde_json::from_str(raw).unwrap();
        let identity = response.into_identity("submitted@example.com");
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.token, "legacy-tok");
    }

    #[test]
    fn test_registration_body_omits_empty_optionals() {
        let registration = Registration {
            email: "a@b.com".to_owned(),
            password: SecretString::from("hunter22"),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            sex: "female".to_owned(),
            title: None,
            location: None,
        };
        let json = serde_json::to_value(registration.body()).unwrap();
        assert!(json.get("title").is_none());
        assert!(json.get("location").is_none());
        assert_eq!(json["password"], "hunter22");
    }

    #[test]
    fn test_code_verification_tolerates_id_alias() {
        let parsed: CodeVerification = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert_eq!(parsed.user_id.as_deref(), Some("42"));

        let parsed: CodeVerification = serde_json::from_str("{}").unwrap();
        assert!(parsed.user_id.is_none());
    }
}
