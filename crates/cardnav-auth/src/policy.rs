//! Access policy trait and the allow-list implementation.
//!
//! ```text
//! AccessPolicy trait          <- "may this principal reach privileged routes?"
//!      │
//!      └── AllowSet           <- static allow-list of handles (empty = open mode)
//! ```

use cardnav_types::{Handle, IdError, Principal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Decides whether an authenticated principal may reach privileged routes.
///
/// The absent-principal case is handled by [`AccessPolicy::decide`], so
/// implementors only see signed-in principals.
///
/// # Example
///
/// ```
/// use cardnav_auth::{AccessDecision, AccessPolicy};
/// use cardnav_types::{Handle, Principal};
///
/// struct ProviderOnly(&'static str);
///
/// impl AccessPolicy for ProviderOnly {
///     fn permits(&self, principal: &Principal) -> bool {
///         principal.provider() == self.0
///     }
/// }
///
/// let policy = ProviderOnly("github");
/// let who = Principal::new("github", "1", Handle::try_from("octocat").unwrap());
///
/// assert!(policy.decide(Some(&who)).is_allowed());
/// assert_eq!(policy.decide(None), AccessDecision::Unauthenticated);
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Returns `true` if the signed-in principal is permitted.
    fn permits(&self, principal: &Principal) -> bool;

    /// Full decision including the "nobody signed in" case.
    fn decide(&self, principal: Option<&Principal>) -> AccessDecision {
        match principal {
            None => AccessDecision::Unauthenticated,
            Some(p) if self.permits(p) => AccessDecision::Allowed,
            Some(_) => AccessDecision::Denied,
        }
    }
}

/// Outcome of an [`AccessPolicy`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Signed in and permitted.
    Allowed,
    /// Signed in but not permitted.
    Denied,
    /// Nobody is signed in.
    Unauthenticated,
}

impl AccessDecision {
    /// Returns `true` only for [`AccessDecision::Allowed`].
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Static allow-list of principal handles, configured at deploy time.
///
/// - **Open mode** (empty set): every signed-in principal is permitted.
/// - **Closed mode**: only principals whose handle is a member.
///
/// # Example
///
/// ```
/// use cardnav_auth::{AccessPolicy, AllowSet};
/// use cardnav_types::{Handle, Principal};
///
/// let who = Principal::new("github", "1", Handle::try_from("octocat").unwrap());
///
/// assert!(AllowSet::open().permits(&who));
///
/// let closed = AllowSet::try_from_names(["hubot"]).unwrap();
/// assert!(!closed.permits(&who));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowSet {
    handles: BTreeSet<Handle>,
}

impl AllowSet {
    /// Creates an empty (open mode) allow-set.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// Builds an allow-set from validated handles.
    #[must_use]
    pub fn from_handles(handles: impl IntoIterator<Item = Handle>) -> Self {
        Self {
            handles: handles.into_iter().collect(),
        }
    }

    /// Builds an allow-set from raw names, validating each.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::EmptyHandle`] if any name is blank.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let handles = names
            .into_iter()
            .map(|n| Handle::try_from(n.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { handles })
    }

    /// Returns `true` in open mode (no handles configured).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handles.is_empty()
    }

    /// Returns `true` if the handle is listed.
    #[must_use]
    pub fn contains(&self, handle: &Handle) -> bool {
        self.handles.contains(handle)
    }

    /// Number of listed handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no handles are listed (same as [`is_open`](Self::is_open)).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates listed handles in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }
}

impl AccessPolicy for AllowSet {
    fn permits(&self, principal: &Principal) -> bool {
        self.is_open() || self.contains(principal.handle())
    }
}
