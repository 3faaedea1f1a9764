//! Session-scoped persistence.
//!
//! A *session* is the lifetime of one browsing context. Everything stored
//! here (navigation history, the signed-in principal) is bound to it and
//! disappears when the session ends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HistoryLedger ("navHistory")   LocalIdentityProvider       │
//! │                                 ("authUser")                │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SessionStore trait (get_item / set_item / remove_item)     │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!           ┌────────────────┴────────────────┐
//!           ▼                                 ▼
//!     ┌────────────┐                   ┌──────────────┐
//!     │ MemoryStore│                   │LocalFileStore│
//!     └────────────┘                   └──────────────┘
//! ```

mod error;
mod local;
mod memory;
mod store;

pub use error::StorageError;
pub use local::{default_session_path, LocalFileStore};
pub use memory::MemoryStore;
pub use store::{is_valid_key, SessionStore};
