//! Session identity.

use serde::{Deserialize, Serialize};

/// The authenticated principal held by the session store.
///
/// Minimal data persisted between runs to identify the signed-in user. The
/// token is an opaque bearer credential presented on authenticated
/// requests; nothing in the client inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account email address.
    pub email: String,
    /// Opaque bearer token.
    pub token: String,
}

impl Identity {
    /// Create an identity from its parts.
    #[must_use]
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let identity = Identity::new("user@example.com", "tok-123");
        let json = serde_json::to_string(&identity).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_deserializes_stored_entry() {
        let parsed: Identity =
            serde_json::from_str(r#"{"email":"a@b.com","token":"opaque"}"#).unwrap();
        assert_eq!(parsed.email, "a@b.com");
        assert_eq!(parsed.token, "opaque");
    }
}
