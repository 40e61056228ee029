//! Password-reset flow.
//!
//! A three-stage machine: request a code by email, verify the code, set
//! the new password. Each transition is gated by one remote call; a
//! failure keeps the flow where it is with an inline error, and "back"
//! from the verify stage abandons everything entered so far. At most one
//! call is in flight at a time: submissions while loading are ignored, and
//! the `&mut self` receivers make overlap impossible within one flow.

use secrecy::SecretString;

use smartskills_core::ResetCode;

use crate::api::{ApiClient, ApiError};

/// Continuation invoked once when the flow completes.
pub type CompletionHook = Box<dyn FnOnce() + Send>;

/// Stages of the reset flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStage {
    /// Collecting the account email.
    #[default]
    Request,
    /// A code was sent; collecting it.
    Verify,
    /// Code accepted; collecting the new password.
    Reset,
}

/// One in-progress password-reset attempt.
///
/// Created when the reset UI opens and dropped when it closes; `back`
/// returns it to its initial state in between.
pub struct ResetFlow {
    api: ApiClient,
    stage: ResetStage,
    email: String,
    code: ResetCode,
    user_id: Option<String>,
    error: Option<String>,
    success_message: Option<String>,
    is_loading: bool,
    complete: bool,
    on_complete: Option<CompletionHook>,
}

impl ResetFlow {
    /// Start a flow at the request stage.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            stage: ResetStage::default(),
            email: String::new(),
            code: ResetCode::default(),
            user_id: None,
            error: None,
            success_message: None,
            is_loading: false,
            complete: false,
            on_complete: None,
        }
    }

    /// Attach a continuation invoked exactly once, on terminal success.
    #[must_use]
    pub fn with_completion(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Field edits
    // ─────────────────────────────────────────────────────────────────────

    /// Update the email field. Clears any displayed error.
    pub fn set_email(&mut self, raw: &str) {
        self.email = raw.to_owned();
        self.error = None;
    }

    /// Update the code field from raw input. Non-digits are stripped and
    /// the value truncated as typed; clears any displayed error.
    pub fn set_code(&mut self, raw: &str) {
        self.code = ResetCode::sanitize(raw);
        self.error = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Submit the email and request a verification code.
    ///
    /// Success advances to the verify stage; failure stays here with an
    /// inline error. An empty email is a local validation error and issues
    /// no call.
    pub async fn submit_email(&mut self) {
        if self.stage != ResetStage::Request || self.is_loading {
            return;
        }
        if self.email.trim().is_empty() {
            self.error = Some("Please enter your email".to_owned());
            return;
        }

        self.begin();
        match self.api.send_reset_code(&self.email).await {
            Ok(()) => {
                self.stage = ResetStage::Verify;
                self.success_message = Some("Verification code sent to your email.".to_owned());
            }
            Err(error) => {
                tracing::debug!(%error, "send-reset-code failed");
                self.error = Some("Failed to send code. Please try again.".to_owned());
            }
        }
        self.is_loading = false;
    }

    /// Submit the entered code for verification.
    ///
    /// Success advances to the reset stage (capturing the account id when
    /// the backend reports one); failure stays here with an inline error.
    pub async fn submit_code(&mut self) {
        if self.stage != ResetStage::Verify || self.is_loading {
            return;
        }
        if !self.code.is_complete() {
            self.error = Some("Please enter the verification code".to_owned());
            return;
        }

        self.begin();
        match self
            .api
            .verify_reset_code(&self.email, self.code.as_str())
            .await
        {
            Ok(verification) => {
                self.stage = ResetStage::Reset;
                self.user_id = verification.user_id;
                self.success_message =
                    Some("Code verified successfully! Now set a new password.".to_owned());
            }
            Err(error) => {
                tracing::debug!(%error, "verify-reset-code failed");
                self.error = Some("Invalid or expired verification code.".to_owned());
            }
        }
        self.is_loading = false;
    }

    /// Submit the new password and complete the flow.
    ///
    /// On success the completion hook fires (at most once) and the flow is
    /// marked complete; failure stays here with an inline error.
    pub async fn submit_password(&mut self, new_password: &SecretString) {
        use secrecy::ExposeSecret;

        if self.stage != ResetStage::Reset || self.is_loading || self.complete {
            return;
        }
        if new_password.expose_secret().is_empty() {
            self.error = Some("Please enter a new password".to_owned());
            return;
        }
        let Some(user_id) = self.user_id.clone() else {
            // The backend never told us whose code this was; restarting is
            // the only safe way forward.
            self.error = Some(
                "Could not identify the account for this reset. Please start over.".to_owned(),
            );
            return;
        };

        self.begin();
        match self.api.update_password(&user_id, new_password).await {
            Ok(()) => {
                self.success_message = Some("Password updated successfully!".to_owned());
                self.complete = true;
                if let Some(hook) = self.on_complete.take() {
                    hook();
                }
            }
            Err(error) => {
                tracing::debug!(%error, "password update failed");
                self.error = Some("Failed to reset password. Please try again.".to_owned());
            }
        }
        self.is_loading = false;
    }

    /// Abandon the current attempt and return to the first stage.
    ///
    /// Everything captured so far is discarded, not just the stage
    /// pointer: email, code, error, and success message all reset.
    pub fn back(&mut self) {
        self.stage = ResetStage::Request;
        self.email.clear();
        self.code = ResetCode::default();
        self.user_id = None;
        self.error = None;
        self.success_message = None;
        self.is_loading = false;
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> ResetStage {
        self.stage
    }

    /// Email captured at the request stage.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Code entered so far.
    #[must_use]
    pub const fn code(&self) -> &ResetCode {
        &self.code
    }

    /// Inline error to display, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success message to display, if any.
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Whether a remote call is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the flow reached terminal success.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }
}
