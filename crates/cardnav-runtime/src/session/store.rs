//! Session storage abstraction.
//!
//! The [`SessionStore`] trait is a string key-value store whose contents
//! live exactly as long as one browsing session. Callers serialize their
//! own values; the store never interprets them.

use super::StorageError;

/// Session-scoped key-value storage.
///
/// Implementations must be thread-safe (`Send + Sync`) so one store can be
/// shared by the history ledger and the identity provider of a session.
///
/// Writes are synchronous from the caller's point of view and are not
/// retried; callers that treat persistence as best-effort log and drop the
/// error.
///
/// # Example
///
/// ```
/// use cardnav_runtime::session::{MemoryStore, SessionStore, StorageError};
///
/// fn remember(store: &impl SessionStore) -> Result<(), StorageError> {
///     store.set_item("lastCard", "\"intro\"")?;
///     assert_eq!(store.get_item("lastCard")?.as_deref(), Some("\"intro\""));
///     Ok(())
/// }
///
/// remember(&MemoryStore::new()).unwrap();
/// ```
pub trait SessionStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key` entirely. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Returns `true` if a value is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_item(key)?.is_some())
    }
}

/// Returns `true` if `key` is safe to use as a file stem.
///
/// Keys are limited to ASCII letters, digits, `-` and `_`.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
