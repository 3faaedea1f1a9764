//! Session-local identity provider.
//!
//! Stands in for an OAuth popup when cardnav runs as a CLI: the "sign-in"
//! succeeds for whatever handle the caller supplied as a credential, and the
//! signed-in principal is kept in the session store under `authUser` so it
//! survives across invocations of the same session.

use crate::session::SessionStore;
use async_trait::async_trait;
use cardnav_auth::{AuthError, IdentityProvider, NoticePublisher, NoticeReceiver};
use cardnav_types::{Handle, Principal};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Session store key holding the signed-in principal.
pub const AUTH_USER_KEY: &str = "authUser";

/// Provider name recorded on principals created here.
pub const LOCAL_PROVIDER: &str = "local";

/// Identity provider backed by the session store.
///
/// Publishes the restored principal (or `None`) as its first notice at
/// construction, so a gate built on it never stays loading.
pub struct LocalIdentityProvider {
    store: Arc<dyn SessionStore>,
    publisher: NoticePublisher,
    credential: Mutex<Option<Handle>>,
}

impl LocalIdentityProvider {
    /// Restores any principal persisted in `store` and publishes it.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let principal = load_principal(store.as_ref());
        let publisher = NoticePublisher::new();
        publisher.publish(principal);

        Self {
            store,
            publisher,
            credential: Mutex::new(None),
        }
    }

    /// Sets the handle the next `sign_in` will authenticate as.
    #[must_use]
    pub fn with_credential(self, handle: Handle) -> Self {
        *self.credential.lock() = Some(handle);
        self
    }

    /// Replaces (or clears) the pending credential.
    pub fn set_credential(&self, handle: Option<Handle>) {
        *self.credential.lock() = handle;
    }

    /// Builds the principal this provider issues for `handle`.
    #[must_use]
    pub fn principal_for(handle: Handle) -> Principal {
        let uid = format!("{LOCAL_PROVIDER}-{handle}");
        Principal::new(LOCAL_PROVIDER, uid, handle)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self) -> Result<(), AuthError> {
        let Some(handle) = self.credential.lock().clone() else {
            return Err(AuthError::SignInCancelled);
        };

        let principal = Self::principal_for(handle);
        let json = serde_json::to_string(&principal)
            .map_err(|e| AuthError::sign_in_failed(e.to_string()))?;
        self.store
            .set_item(AUTH_USER_KEY, &json)
            .map_err(|e| AuthError::sign_in_failed(e.to_string()))?;

        self.publisher.publish(Some(principal));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.store
            .remove_item(AUTH_USER_KEY)
            .map_err(|e| AuthError::sign_out_failed(e.to_string()))?;

        self.publisher.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> NoticeReceiver {
        self.publisher.subscribe()
    }
}

impl fmt::Debug for LocalIdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalIdentityProvider")
            .field("credential", &*self.credential.lock())
            .field("latest", &self.publisher.latest())
            .finish_non_exhaustive()
    }
}

fn load_principal(store: &dyn SessionStore) -> Option<Principal> {
    let raw = match store.get_item(AUTH_USER_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(error = %e, "Failed to read stored principal");
            return None;
        }
    };

    match serde_json::from_str::<Principal>(&raw) {
        Ok(principal) => {
            debug!(handle = %principal.handle(), "Restored signed-in principal");
            Some(principal)
        }
        Err(e) => {
            warn!(error = %e, "Discarding malformed stored principal");
            None
        }
    }
}
