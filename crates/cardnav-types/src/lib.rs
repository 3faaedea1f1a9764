//! Core types for cardnav.
//!
//! This crate provides the identifier and identity types shared by every
//! other cardnav crate.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  cardnav-types   : PageId, SessionId, Principal  ◄── HERE    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cardnav-auth    : AllowSet, AccessGate, IdentityProvider   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cardnav-runtime : history, session store, routing, config  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cardnav-cli     : `cardnav` binary                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use cardnav_types::{Handle, PageId, Principal, SessionId, TryNew};
//!
//! let page = PageId::try_new("home".to_string()).unwrap();
//! let session = SessionId::try_new("default".to_string()).unwrap();
//! let who = Principal::new("github", "583231", Handle::try_from("octocat").unwrap());
//!
//! assert_eq!(page.as_str(), "home");
//! assert_eq!(session.as_str(), "default");
//! assert_eq!(who.handle().as_str(), "octocat");
//! ```

mod construct;
mod error;
mod id;
mod principal;

pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{IdError, PageId, SessionId};
pub use principal::{Handle, Principal};
