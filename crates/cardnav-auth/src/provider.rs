//! Identity provider seam.
//!
//! The provider performs the real sign-in handshake. cardnav only consumes
//! two things from it:
//!
//! - the one-shot result of *initiating* sign-in / sign-out (a future)
//! - a stream of principal-change notifications (a `watch` channel)
//!
//! ```text
//! IdentityProvider ──sign_in()/sign_out()──► Result<(), AuthError>
//!        │
//!        └── NoticePublisher ──watch──► AccessGate (latest notice wins)
//! ```

use crate::AuthError;
use async_trait::async_trait;
use cardnav_types::Principal;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// One principal-change notification.
///
/// `generation` increases strictly with every notification a provider
/// publishes. Consumers drop notices that are not newer than the last one
/// they applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalNotice {
    /// Publication order, starting at 1.
    pub generation: u64,
    /// The signed-in principal, or `None` after sign-out.
    pub principal: Option<Principal>,
}

/// Receiver side of a provider's notification stream.
///
/// Holds `None` until the provider publishes its first notice.
pub type NoticeReceiver = watch::Receiver<Option<PrincipalNotice>>;

/// An external identity provider.
///
/// # Contract
///
/// - `sign_in` resolves when the interactive flow has completed or failed.
///   The resulting principal arrives through [`subscribe`](Self::subscribe),
///   not through the return value.
/// - `sign_out` terminates the provider session; the `None` principal again
///   arrives through the notification stream.
/// - `subscribe` may be called at any time and always observes the latest
///   notice.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Starts the interactive sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the flow was cancelled or failed.
    async fn sign_in(&self) -> Result<(), AuthError>;

    /// Terminates the current provider session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignOutFailed`] if the provider could not comply.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns a receiver for principal-change notifications.
    fn subscribe(&self) -> NoticeReceiver;
}

/// Publishing half used by provider implementations.
///
/// Stamps each notice with the next generation and replaces the current
/// value of the watch channel, so late subscribers see only the latest.
///
/// # Example
///
/// ```
/// use cardnav_auth::NoticePublisher;
///
/// let publisher = NoticePublisher::new();
/// let rx = publisher.subscribe();
/// assert!(rx.borrow().is_none());
///
/// let notice = publisher.publish(None);
/// assert_eq!(notice.generation, 1);
/// assert_eq!(rx.borrow().as_ref().map(|n| n.generation), Some(1));
/// ```
#[derive(Debug)]
pub struct NoticePublisher {
    tx: watch::Sender<Option<PrincipalNotice>>,
    generation: AtomicU64,
}

impl NoticePublisher {
    /// Creates a publisher with no notice published yet.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Publishes a new principal value and returns the stamped notice.
    pub fn publish(&self, principal: Option<Principal>) -> PrincipalNotice {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let notice = PrincipalNotice {
            generation,
            principal,
        };
        // send_replace never fails, even with zero receivers.
        self.tx.send_replace(Some(notice.clone()));
        notice
    }

    /// Returns a new receiver observing the latest notice.
    #[must_use]
    pub fn subscribe(&self) -> NoticeReceiver {
        self.tx.subscribe()
    }

    /// Returns the most recently published principal, if any notice exists.
    #[must_use]
    pub fn latest(&self) -> Option<PrincipalNotice> {
        self.tx.borrow().clone()
    }
}

impl Default for NoticePublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardnav_types::Handle;

    fn principal(handle: &str) -> Principal {
        Principal::new("test", handle, Handle::try_from(handle).expect("valid"))
    }

    #[test]
    fn generations_increase_strictly() {
        let publisher = NoticePublisher::new();
        let a = publisher.publish(Some(principal("alice")));
        let b = publisher.publish(None);
        let c = publisher.publish(Some(principal("bob")));
        assert_eq!((a.generation, b.generation, c.generation), (1, 2, 3));
    }

    #[test]
    fn late_subscriber_sees_latest_only() {
        let publisher = NoticePublisher::new();
        publisher.publish(Some(principal("alice")));
        publisher.publish(None);

        let rx = publisher.subscribe();
        let latest = rx.borrow().clone().expect("a notice was published");
        assert_eq!(latest.generation, 2);
        assert!(latest.principal.is_none());
    }

    #[tokio::test]
    async fn receiver_is_woken_on_publish() {
        let publisher = NoticePublisher::new();
        let mut rx = publisher.subscribe();

        publisher.publish(Some(principal("alice")));
        rx.changed().await.expect("sender alive");

        let notice = rx.borrow_and_update().clone().expect("notice present");
        assert_eq!(
            notice.principal.map(|p| p.handle().to_string()),
            Some("alice".to_string())
        );
    }
}
