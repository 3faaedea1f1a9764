//! Access gating for cardnav.
//!
//! This crate decides whether the current browsing session may reach
//! privileged routes (`/upload`, `/admin`, `/admin/graph`).
//!
//! # Model
//!
//! ```text
//! authorized = principal is present ∧ (allow-set is empty ∨ handle ∈ allow-set)
//! ```
//!
//! | Piece | Type | Role |
//! |-------|------|------|
//! | [`IdentityProvider`] | Trait | External sign-in flow + notification stream |
//! | [`AccessPolicy`] | Trait | Who may pass once signed in |
//! | [`AllowSet`] | Struct | Static allow-list (empty = open mode) |
//! | [`AccessGate`] | Struct | Session-scoped cache of the latest principal |
//!
//! # Crate Architecture
//!
//! ```text
//! cardnav-types  (PageId, Principal, Handle)
//!      ↑
//! cardnav-auth  ◄── THIS CRATE
//!      ↑
//! cardnav-runtime (Navigator consults AccessGate on privileged routes)
//! ```

mod error;
mod gate;
mod policy;
mod provider;
pub mod testing;

pub use error::AuthError;
pub use gate::{AccessGate, GateState};
pub use policy::{AccessDecision, AccessPolicy, AllowSet};
pub use provider::{IdentityProvider, NoticePublisher, NoticeReceiver, PrincipalNotice};

// Re-export Principal from cardnav_types for convenience
pub use cardnav_types::Principal;
