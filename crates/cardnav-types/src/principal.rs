//! Authenticated identity types.
//!
//! A [`Principal`] is the record an identity provider hands back after a
//! successful sign-in. cardnav treats it as opaque except for its
//! [`Handle`], the stable per-provider username that allow-lists compare
//! against.
//!
//! # Design Rationale
//!
//! Principal lives in `cardnav-types` (not `cardnav-auth`) because the
//! runtime persists it in session storage and the CLI prints it, neither of
//! which needs the authorization logic.

use crate::{IdError, TryNew};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable per-provider username, e.g. a GitHub screen name.
///
/// Comparison is exact (case-sensitive), matching how providers report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryNew for Handle {
    type Error = IdError;
    type Args = String;

    fn try_new(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(IdError::EmptyHandle);
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for Handle {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for Handle {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value.to_string())
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated identity as reported by the identity provider.
///
/// "No authenticated principal" is expressed as `Option::<Principal>::None`
/// by consumers, never by a sentinel value.
///
/// # Example
///
/// ```
/// use cardnav_types::{Handle, Principal};
///
/// let handle = Handle::try_from("octocat").unwrap();
/// let principal = Principal::new("github", "uid-1", handle)
///     .with_display_name("The Octocat");
///
/// assert_eq!(principal.handle().as_str(), "octocat");
/// assert_eq!(format!("{principal}"), "github:octocat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Provider name (`github`, `local`, ...).
    provider: String,
    /// Provider-assigned unique id.
    uid: String,
    /// Username used for allow-list comparison.
    handle: Handle,
    /// Human-readable name, if the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl Principal {
    /// Creates a principal without a display name.
    #[must_use]
    pub fn new(provider: impl Into<String>, uid: impl Into<String>, handle: Handle) -> Self {
        Self {
            provider: provider.into(),
            uid: uid.into(),
            handle,
            display_name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns the provider name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the provider-assigned uid.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Returns the allow-list handle.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(s: &str) -> Handle {
        Handle::try_from(s).expect("test handle should be valid")
    }

    #[test]
    fn handle_rejects_blank() {
        assert_eq!(Handle::try_from(""), Err(IdError::EmptyHandle));
        assert_eq!(Handle::try_from("   "), Err(IdError::EmptyHandle));
    }

    #[test]
    fn handle_comparison_is_case_sensitive() {
        assert_ne!(handle("Octocat"), handle("octocat"));
    }

    #[test]
    fn principal_accessors() {
        let p = Principal::new("github", "42", handle("octocat")).with_display_name("Octo");
        assert_eq!(p.provider(), "github");
        assert_eq!(p.uid(), "42");
        assert_eq!(p.handle().as_str(), "octocat");
        assert_eq!(p.display_name(), Some("Octo"));
    }

    #[test]
    fn principal_json_shape() {
        let p = Principal::new("local", "u1", handle("alice"));
        let json = serde_json::to_value(&p).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"provider": "local", "uid": "u1", "handle": "alice"})
        );

        let back: Principal = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, p);
    }

    #[test]
    fn principal_equality_includes_uid() {
        let a = Principal::new("github", "1", handle("alice"));
        let b = Principal::new("github", "2", handle("alice"));
        assert_ne!(a, b);
    }
}
