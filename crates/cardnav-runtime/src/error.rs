//! Runtime error type.
//!
//! [`NavError`] wraps the per-concern errors so callers that open a whole
//! session deal with one type. Codes and recoverability come from the
//! wrapped error.

use crate::config::ConfigError;
use crate::content::ContentError;
use crate::session::StorageError;
use cardnav_auth::AuthError;
use cardnav_types::{ErrorCode, IdError};
use thiserror::Error;

/// Error returned by session-level operations.
///
/// # Example
///
/// ```
/// use cardnav_runtime::NavError;
/// use cardnav_auth::AuthError;
/// use cardnav_types::ErrorCode;
///
/// let err = NavError::from(AuthError::SignInCancelled);
/// assert_eq!(err.code(), "AUTH_SIGN_IN_CANCELLED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum NavError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("invalid identifier: {0}")]
    Id(#[from] IdError),
}

impl ErrorCode for NavError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Storage(e) => e.code(),
            Self::Content(e) => e.code(),
            Self::Auth(e) => e.code(),
            Self::Id(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(e) => e.is_recoverable(),
            Self::Storage(e) => e.is_recoverable(),
            Self::Content(e) => e.is_recoverable(),
            Self::Auth(e) => e.is_recoverable(),
            Self::Id(e) => e.is_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_codes() {
        let err = NavError::from(StorageError::unavailable("quota"));
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
        assert!(err.is_recoverable());

        let err = NavError::from(IdError::EmptyPageId);
        assert_eq!(err.code(), "TYPES_EMPTY_PAGE_ID");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn display_names_the_concern() {
        let err = NavError::from(ConfigError::invalid("history.max_entries", "must be at least 1"));
        assert!(err.to_string().starts_with("config error:"));
        assert!(err.to_string().contains("history.max_entries"));
    }
}
