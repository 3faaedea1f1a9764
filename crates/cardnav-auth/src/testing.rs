//! Test doubles for the identity provider seam.
//!
//! [`ScriptedProvider`] lets tests (in this workspace and downstream) drive
//! an [`AccessGate`](crate::AccessGate) through every state without a real
//! sign-in flow.

use crate::{AuthError, IdentityProvider, NoticePublisher, NoticeReceiver};
use async_trait::async_trait;
use cardnav_types::{Handle, Principal};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identity provider whose outcomes are queued up front.
///
/// - `sign_in` pops the next scripted result; an empty queue behaves like a
///   user closing the sign-in popup ([`AuthError::SignInCancelled`]).
/// - `sign_out` publishes `None` unless a failure was queued.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    publisher: NoticePublisher,
    sign_ins: Mutex<VecDeque<Result<Principal, AuthError>>>,
    sign_out_failure: Mutex<Option<AuthError>>,
    sign_in_calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Creates a provider that has not notified yet (gate stays loading).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider whose initial notice is already published.
    #[must_use]
    pub fn resolved(principal: Option<Principal>) -> Self {
        let provider = Self::new();
        provider.publisher.publish(principal);
        provider
    }

    /// Builds a principal from a handle, for test brevity.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is blank.
    #[must_use]
    pub fn principal(handle: &str) -> Principal {
        let handle = Handle::try_from(handle).expect("scripted handle must not be blank");
        Principal::new("scripted", format!("uid-{handle}"), handle)
    }

    /// Queues the outcome of the next `sign_in` call.
    pub fn push_sign_in(&self, outcome: Result<Principal, AuthError>) {
        self.sign_ins.lock().push_back(outcome);
    }

    /// Makes the next `sign_out` call fail.
    pub fn fail_next_sign_out(&self, err: AuthError) {
        *self.sign_out_failure.lock() = Some(err);
    }

    /// Publishes an arbitrary notice, as if the provider changed state on
    /// its own (token expiry, sign-in from another tab).
    pub fn notify(&self, principal: Option<Principal>) {
        self.publisher.publish(principal);
    }

    /// Number of `sign_in` calls so far.
    #[must_use]
    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn sign_in(&self) -> Result<(), AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.sign_ins.lock().pop_front();
        match next {
            Some(Ok(principal)) => {
                self.publisher.publish(Some(principal));
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => Err(AuthError::SignInCancelled),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(err) = self.sign_out_failure.lock().take() {
            return Err(err);
        }
        self.publisher.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> NoticeReceiver {
        self.publisher.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_script_cancels_sign_in() {
        let provider = ScriptedProvider::new();
        assert_eq!(provider.sign_in().await, Err(AuthError::SignInCancelled));
        assert_eq!(provider.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn scripted_sign_in_publishes_principal() {
        let provider = ScriptedProvider::new();
        let rx = provider.subscribe();
        provider.push_sign_in(Ok(ScriptedProvider::principal("alice")));

        provider.sign_in().await.expect("scripted success");

        let notice = rx.borrow().clone().expect("notice published");
        assert_eq!(notice.generation, 1);
        assert!(notice.principal.is_some());
    }
}
