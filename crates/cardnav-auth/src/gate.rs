//! Access gate: the authorization predicate behind privileged routes.
//!
//! # State Machine
//!
//! ```text
//!            first notice
//! Loading ──────────────────┬──► Unauthenticated ◄──┐
//!                           │          │ login      │ logout
//!                           │          ▼            │
//!                           ├──► AuthenticatedAllowed
//!                           └──► AuthenticatedDenied
//! ```
//!
//! `Loading` is entered at construction and never re-entered. Every later
//! transition is driven by a provider notice, never by the gate itself.

use crate::{
    AccessDecision, AccessPolicy, AllowSet, AuthError, IdentityProvider, NoticeReceiver,
    PrincipalNotice,
};
use cardnav_types::Principal;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Observable state of an [`AccessGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No provider notice has arrived yet.
    Loading,
    /// The provider reported no signed-in principal.
    Unauthenticated,
    /// Signed in and permitted by the policy.
    AuthenticatedAllowed,
    /// Signed in but rejected by the policy.
    AuthenticatedDenied,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Loading => "loading",
            Self::Unauthenticated => "unauthenticated",
            Self::AuthenticatedAllowed => "authenticated (allowed)",
            Self::AuthenticatedDenied => "authenticated (denied)",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
struct Observed {
    principal: Option<Principal>,
    loading: bool,
    generation: u64,
}

/// Session-scoped authorization gate.
///
/// The gate subscribes to its provider exactly once, at construction, and
/// caches the latest applied notice. The watch channel is the only way in:
/// reads pull the newest value from it first, so
/// [`is_authorized`](Self::is_authorized) always reflects the most recent
/// notification and never an older one.
///
/// # Example
///
/// ```
/// use cardnav_auth::testing::ScriptedProvider;
/// use cardnav_auth::{AccessGate, AllowSet, GateState};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let provider = Arc::new(ScriptedProvider::resolved(None));
/// let gate = AccessGate::new(AllowSet::open(), provider.clone());
/// assert_eq!(gate.state(), GateState::Unauthenticated);
///
/// provider.push_sign_in(Ok(ScriptedProvider::principal("octocat")));
/// gate.login().await.unwrap();
/// assert!(gate.is_authorized());
/// # }
/// ```
pub struct AccessGate<P: AccessPolicy = AllowSet> {
    policy: P,
    provider: Arc<dyn IdentityProvider>,
    notices: NoticeReceiver,
    observed: RwLock<Observed>,
}

impl<P: AccessPolicy> AccessGate<P> {
    /// Creates a gate and subscribes to the provider's notifications.
    ///
    /// If the provider already published a notice, it is applied right away.
    pub fn new(policy: P, provider: Arc<dyn IdentityProvider>) -> Self {
        let notices = provider.subscribe();
        let gate = Self {
            policy,
            provider,
            notices,
            observed: RwLock::new(Observed {
                principal: None,
                loading: true,
                generation: 0,
            }),
        };
        gate.sync();
        gate
    }

    /// Returns the policy in use.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Applies a notice if it is newer than the last applied one.
    ///
    /// Notices only arrive through the provider's watch channel, so every
    /// generation compared here was stamped by the same publisher. Silent:
    /// callers that want a log line use [`announce`].
    fn apply(&self, notice: PrincipalNotice) -> bool {
        let mut observed = self.observed.write();
        if notice.generation <= observed.generation {
            return false;
        }
        observed.principal = notice.principal;
        observed.loading = false;
        observed.generation = notice.generation;
        true
    }

    /// Pulls the latest notice from the watch channel into the cache.
    fn sync(&self) -> bool {
        let latest = self.notices.borrow().clone();
        latest.is_some_and(|notice| self.apply(notice))
    }

    /// Returns `true` until the first provider notice has been applied.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.sync();
        self.observed.read().loading
    }

    /// Returns the currently signed-in principal.
    #[must_use]
    pub fn current_principal(&self) -> Option<Principal> {
        self.sync();
        self.observed.read().principal.clone()
    }

    /// Returns `true` if a principal is signed in and permitted.
    ///
    /// Always `false` while loading or signed out. Like every read, this
    /// refreshes the cached notice from the watch channel first; reads never
    /// log.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.decision().is_allowed()
    }

    /// Returns the policy decision for the current principal.
    #[must_use]
    pub fn decision(&self) -> AccessDecision {
        self.sync();
        let observed = self.observed.read();
        self.policy.decide(observed.principal.as_ref())
    }

    /// Returns the gate's state-machine position.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.sync();
        let observed = self.observed.read();
        if observed.loading {
            return GateState::Loading;
        }
        match self.policy.decide(observed.principal.as_ref()) {
            AccessDecision::Allowed => GateState::AuthenticatedAllowed,
            AccessDecision::Denied => GateState::AuthenticatedDenied,
            AccessDecision::Unauthenticated => GateState::Unauthenticated,
        }
    }

    /// Starts the provider's interactive sign-in flow.
    ///
    /// On success the new principal is picked up from the notification
    /// stream before this returns, if the provider already published it.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`AuthError`]; the caller decides how to
    /// present it.
    pub async fn login(&self) -> Result<(), AuthError> {
        if let Err(e) = self.provider.sign_in().await {
            error!(error = %e, "Login error");
            return Err(e);
        }
        if let Some(principal) = self.current_principal() {
            announce(Some(&principal));
        }
        Ok(())
    }

    /// Ends the provider session. Best-effort: failures are logged only.
    pub async fn logout(&self) {
        if let Err(e) = self.provider.sign_out().await {
            error!(error = %e, "Logout error");
        }
        if self.sync() {
            announce(self.observed.read().principal.as_ref());
        }
    }

    /// Spawns a task that applies every provider notice as it arrives.
    ///
    /// Reads already pull the newest notice, so the listener only matters to
    /// callers that want sign-in/out logged as it happens (token expiry,
    /// sign-in from another tab). The task holds a
    /// weak reference: once the gate is dropped, the next notice ends it.
    pub fn spawn_listener(self: &Arc<Self>) -> JoinHandle<()>
    where
        P: 'static,
    {
        let weak = Arc::downgrade(self);
        let mut rx = self.notices.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let Some(gate) = weak.upgrade() else {
                    debug!("Access gate dropped, listener exiting");
                    break;
                };
                let latest = rx.borrow_and_update().clone();
                if let Some(notice) = latest {
                    let principal = notice.principal.clone();
                    if gate.apply(notice) {
                        announce(principal.as_ref());
                    }
                }
            }
        })
    }

    /// Waits until the first provider notice has arrived.
    ///
    /// Returns immediately if the gate is no longer loading. If the provider
    /// is dropped before notifying, the gate stays in [`GateState::Loading`].
    pub async fn wait_until_loaded(&self) {
        let mut rx = self.notices.clone();
        if rx.wait_for(Option::is_some).await.is_err() {
            debug!("Identity provider dropped before first notice");
        }
        self.sync();
    }
}

/// Logs a principal change at `info`, naming the handle so operators can
/// add it to the allow-list.
fn announce(principal: Option<&Principal>) {
    match principal {
        Some(principal) => {
            info!(handle = %principal.handle(), provider = principal.provider(), "Signed in");
        }
        None => info!("Signed out"),
    }
}

impl<P: AccessPolicy + fmt::Debug> fmt::Debug for AccessGate<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observed = self.observed.read();
        f.debug_struct("AccessGate")
            .field("policy", &self.policy)
            .field("principal", &observed.principal)
            .field("loading", &observed.loading)
            .field("generation", &observed.generation)
            .finish_non_exhaustive()
    }
}
