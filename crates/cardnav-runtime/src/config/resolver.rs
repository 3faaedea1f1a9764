//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  NavConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     NavConfig (final)
//! ```
//!
//! # Example
//!
//! ```
//! use cardnav_runtime::config::{ConfigResolver, NavConfig};
//!
//! struct CliOverrides {
//!     allow: Vec<String>,
//! }
//!
//! impl ConfigResolver for CliOverrides {
//!     fn apply(&self, config: &mut NavConfig) {
//!         if !self.allow.is_empty() {
//!             config.auth.allowed_users = self.allow.clone();
//!         }
//!     }
//! }
//!
//! let mut config = NavConfig::default();
//! CliOverrides { allow: vec!["octocat".into()] }.apply(&mut config);
//! assert_eq!(config.auth.allowed_users, ["octocat"]);
//! ```

use super::NavConfig;

/// Trait for applying configuration overrides.
///
/// Separates config loading (file/env) from runtime overrides (CLI flags,
/// programmatic settings).
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    ///
    /// Only values that were actually specified should be applied.
    fn apply(&self, config: &mut NavConfig);
}

/// No-op resolver that makes no changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut NavConfig) {}
}
