//! Authentication error type.

use cardnav_types::ErrorCode;
use thiserror::Error;

/// Errors surfaced by identity providers and the access gate.
///
/// Only sign-in failures reach callers of
/// [`AccessGate::login`](crate::AccessGate::login); sign-out failures are
/// logged by the gate and dropped.
///
/// # Example
///
/// ```
/// use cardnav_auth::AuthError;
/// use cardnav_types::ErrorCode;
///
/// let err = AuthError::SignInCancelled;
/// assert_eq!(err.code(), "AUTH_SIGN_IN_CANCELLED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The user abandoned the interactive sign-in flow.
    #[error("sign-in cancelled")]
    SignInCancelled,

    /// The provider's sign-in flow failed (network, rejected credentials).
    #[error("sign-in failed: {0}")]
    SignInFailed(String),

    /// The provider could not terminate the session.
    #[error("sign-out failed: {0}")]
    SignOutFailed(String),

    /// The provider itself is misconfigured or its backing store failed.
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Creates a SignInFailed error.
    pub fn sign_in_failed(reason: impl Into<String>) -> Self {
        Self::SignInFailed(reason.into())
    }

    /// Creates a SignOutFailed error.
    pub fn sign_out_failed(reason: impl Into<String>) -> Self {
        Self::SignOutFailed(reason.into())
    }

    /// Creates a Provider error.
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider(reason.into())
    }
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::SignInCancelled => "AUTH_SIGN_IN_CANCELLED",
            Self::SignInFailed(_) => "AUTH_SIGN_IN_FAILED",
            Self::SignOutFailed(_) => "AUTH_SIGN_OUT_FAILED",
            Self::Provider(_) => "AUTH_PROVIDER",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Provider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardnav_types::assert_error_codes;

    #[test]
    fn all_codes_follow_convention() {
        assert_error_codes(
            &[
                AuthError::SignInCancelled,
                AuthError::sign_in_failed("popup blocked"),
                AuthError::sign_out_failed("offline"),
                AuthError::provider("no store"),
            ],
            "AUTH_",
        );
    }

    #[test]
    fn display_includes_reason() {
        let err = AuthError::sign_in_failed("popup blocked");
        assert!(err.to_string().contains("popup blocked"), "got: {err}");
    }

    #[test]
    fn provider_errors_are_not_recoverable() {
        assert!(!AuthError::provider("x").is_recoverable());
        assert!(AuthError::sign_in_failed("x").is_recoverable());
    }
}
