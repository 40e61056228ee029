//! Route gate for the protected area.
//!
//! A pure decision over session state: let the navigation through when an
//! identity is active, otherwise redirect to the login entry point. The
//! gate holds no state of its own and must be re-evaluated on every
//! navigation attempt, since the session can change between renders.

use super::store::SessionStore;

/// Route unauthenticated users are redirected to.
pub const LOGIN_ROUTE: &str = "/login";

/// Decision produced when navigation into a protected area is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// An identity is active; let the navigation through.
    Granted,
    /// No identity; redirect to the given route.
    Redirect(&'static str),
}

/// Decide whether a navigation may proceed.
#[must_use]
pub const fn authorize(has_identity: bool) -> Access {
    if has_identity {
        Access::Granted
    } else {
        Access::Redirect(LOGIN_ROUTE)
    }
}

/// Evaluate the gate against the store's state right now.
#[must_use]
pub fn check(store: &SessionStore) -> Access {
    authorize(store.is_authenticated())
}
