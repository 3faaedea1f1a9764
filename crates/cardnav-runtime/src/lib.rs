//! cardnav runtime: navigation history, session storage and routing.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  cardnav-types  : PageId, Handle, Principal, ErrorCode      │
//! │  cardnav-auth   : AccessGate, AllowSet, IdentityProvider    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  history/   : HistoryLedger, HistoryEntry                   │
//! │  session/   : SessionStore, MemoryStore, LocalFileStore     │
//! │  content    : Card, ContentStore, CardDeck                  │
//! │  routing    : Route, RouteTable                             │
//! │  navigator  : Navigator, View                               │
//! │  identity   : LocalIdentityProvider                         │
//! │  config/    : NavConfig, ConfigLoader                       │
//! │  app        : NavSession                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend (cardnav-cli)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`history`] - Navigation History
//!
//! - [`HistoryLedger`](history::HistoryLedger): capped, branch-trimming,
//!   persisted after every mutation
//! - [`HistoryEntry`](history::HistoryEntry): `{pageId, timestamp}`
//!
//! ## [`session`] - Session Storage
//!
//! String key-value storage scoped to one browsing session. The ledger and
//! the local identity provider share one store per session.
//!
//! ## [`navigator`] - Hosting View
//!
//! Resolves paths, consults the [`AccessGate`](cardnav_auth::AccessGate) for
//! privileged routes, records card visits and renders them.
//!
//! ## [`config`] - Configuration Management
//!
//! Configuration priority: CLI > Environment > Project > Global > Default

pub mod app;
pub mod config;
pub mod content;
mod error;
pub mod history;
pub mod identity;
pub mod navigator;
pub mod routing;
pub mod session;

// Re-exports for convenience
pub use app::NavSession;
pub use config::{
    default_config_dir, default_config_path, AuthConfig, ConfigError, ConfigLoader,
    ConfigResolver, HistoryConfig, NavConfig, NoOpResolver, PathsConfig,
};
pub use content::{Card, CardDeck, ContentError, ContentStore, HOME_PAGE};
pub use error::NavError;
pub use history::{HistoryEntry, HistoryLedger, DEFAULT_STORAGE_KEY, MAX_LENGTH};
pub use identity::{LocalIdentityProvider, AUTH_USER_KEY};
pub use navigator::{Navigator, View};
pub use routing::{Route, RouteTable};
pub use session::{
    default_session_path, LocalFileStore, MemoryStore, SessionStore, StorageError,
};

// Re-export Principal from cardnav_types (it's part of the public API)
pub use cardnav_types::Principal;
