//! Identifier types for cardnav.
//!
//! - [`PageId`]: opaque key of a navigable card (non-empty)
//! - [`SessionId`]: names one browsing session (one tab, one CLI session)

use crate::{ErrorCode, TryNew};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for identifier types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Page identifiers must not be empty.
    #[error("page id must not be empty")]
    EmptyPageId,

    /// Principal handles must not be empty.
    #[error("handle must not be empty")]
    EmptyHandle,

    /// Session ids are used as directory names and must be path-safe.
    #[error("invalid session id '{0}': use letters, digits, '-' or '_'")]
    InvalidSessionId(String),
}

impl ErrorCode for IdError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyPageId => "TYPES_EMPTY_PAGE_ID",
            Self::EmptyHandle => "TYPES_EMPTY_HANDLE",
            Self::InvalidSessionId(_) => "TYPES_INVALID_SESSION_ID",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Opaque identifier of a unit of navigable content.
///
/// The only invariant is non-emptiness; the content store decides whether
/// an id refers to an existing card.
///
/// # Example
///
/// ```
/// use cardnav_types::{PageId, TryNew};
///
/// let home = PageId::try_new("home".to_string()).unwrap();
/// assert_eq!(home.as_str(), "home");
/// assert_eq!(format!("{home}"), "home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageId(String);

impl PageId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryNew for PageId {
    type Error = IdError;
    type Args = String;

    fn try_new(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(IdError::EmptyPageId);
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for PageId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for PageId {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value.to_string())
    }
}

impl From<PageId> for String {
    fn from(id: PageId) -> Self {
        id.0
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one browsing session.
///
/// Session-scoped state (history, signed-in principal) is keyed by this id.
/// Named ids are restricted to `[A-Za-z0-9_-]` because stores use them as
/// directory names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

#[allow(clippy::new_without_default)]
impl SessionId {
    /// Creates a fresh, random session id (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// NOTE: No Default: a session id is either generated or explicitly named.

impl TryNew for SessionId {
    type Error = IdError;
    type Args = String;

    fn try_new(value: String) -> Result<Self, Self::Error> {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(IdError::InvalidSessionId(value));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}
