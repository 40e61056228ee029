//! Password-reset verification code.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A verification code for the password-reset flow.
///
/// Codes are exactly six numeric digits. [`sanitize`](Self::sanitize)
/// mirrors the behavior of the code input field: non-digit characters are
/// dropped and the result is truncated as the user types, so the stored
/// value is always a (possibly incomplete) digit prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResetCode(String);

impl ResetCode {
    /// Number of digits in a complete code.
    pub const LENGTH: usize = 6;

    /// Build a code from raw input.
    ///
    /// ```
    /// use smartskills_core::ResetCode;
    ///
    /// assert_eq!(ResetCode::sanitize("12a3456xyz").as_str(), "123456");
    /// ```
    #[must_use]
    pub fn sanitize(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(char::is_ascii_digit)
                .take(Self::LENGTH)
                .collect(),
        )
    }

    /// Whether all six digits have been entered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.len() == Self::LENGTH
    }

    /// Whether no digits have been entered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the digits entered so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
