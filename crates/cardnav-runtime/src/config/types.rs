//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use crate::history::{DEFAULT_STORAGE_KEY, MAX_LENGTH};
use crate::session::is_valid_key;
use cardnav_auth::AllowSet;
use cardnav_types::IdError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use cardnav_runtime::config::NavConfig;
///
/// let config = NavConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.history.max_entries, 50);
/// assert!(config.auth.allowed_users.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavConfig {
    /// Enable debug mode (verbose logging).
    pub debug: bool,

    /// Access gate configuration.
    pub auth: AuthConfig,

    /// History ledger configuration.
    pub history: HistoryConfig,

    /// Path configuration.
    pub paths: PathsConfig,
}

impl NavConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default. An overlay that spells out a default value
    /// is indistinguishable from one that omits it, so it cannot reset
    /// `self` back to that default.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.auth.merge(&other.auth);
        self.history.merge(&other.history);
        self.paths.merge(&other.paths);
    }

    /// Checks constraints that TOML types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_entries == 0 {
            return Err(ConfigError::invalid(
                "history.max_entries",
                "must be at least 1",
            ));
        }
        if !is_valid_key(&self.history.storage_key) {
            return Err(ConfigError::invalid(
                "history.storage_key",
                "use letters, digits, '-' or '_'",
            ));
        }
        if let Err(e) = self.auth.allow_set() {
            return Err(ConfigError::invalid("auth.allowed_users", e.to_string()));
        }
        Ok(())
    }
}

/// Access gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// Handles allowed onto privileged routes.
    ///
    /// Empty means open mode: every signed-in principal is allowed.
    pub allowed_users: Vec<String>,
}

impl AuthConfig {
    /// A non-empty overlay replaces the list instead of extending it, so a
    /// project can narrow the global allow-list.
    fn merge(&mut self, other: &Self) {
        if !other.allowed_users.is_empty() {
            self.allowed_users = other.allowed_users.clone();
        }
    }

    /// Builds the allow-set for the access gate.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::EmptyHandle`] if any entry is blank.
    pub fn allow_set(&self) -> Result<AllowSet, IdError> {
        AllowSet::try_from_names(self.allowed_users.iter().map(String::as_str))
    }
}

/// History ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained entries.
    pub max_entries: usize,

    /// Session store key holding the serialized ledger.
    pub storage_key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_LENGTH,
            storage_key: DEFAULT_STORAGE_KEY.into(),
        }
    }
}

impl HistoryConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.max_entries != default.max_entries {
            self.max_entries = other.max_entries;
        }
        if other.storage_key != default.storage_key {
            self.storage_key = other.storage_key.clone();
        }
    }
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Session storage root.
    pub session_dir: Option<PathBuf>,

    /// JSON file holding the card deck.
    ///
    /// When `None`, only the built-in home card exists.
    pub content_file: Option<PathBuf>,
}

impl PathsConfig {
    fn merge(&mut self, other: &Self) {
        if other.session_dir.is_some() {
            self.session_dir = other.session_dir.clone();
        }
        if other.content_file.is_some() {
            self.content_file = other.content_file.clone();
        }
    }

    /// Returns the session directory, falling back to default.
    #[must_use]
    pub fn session_dir_or_default(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(crate::session::default_session_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NavConfig::default();
        assert!(!config.debug);
        assert_eq!(config.history.max_entries, MAX_LENGTH);
        assert_eq!(config.history.storage_key, "navHistory");
        assert!(config.paths.content_file.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn toml_roundtrip() {
        let config = NavConfig {
            auth: AuthConfig {
                allowed_users: vec!["octocat".into()],
            },
            ..Default::default()
        };
        let toml = config.to_toml().expect("should serialize config to TOML");
        let restored = NavConfig::from_toml(&toml).expect("should deserialize roundtripped TOML");
        assert_eq!(config, restored);
    }

    #[test]
    fn toml_partial_parse() {
        let toml = r#"
debug = true

[history]
max_entries = 10
"#;
        let config = NavConfig::from_toml(toml).expect("should parse partial TOML with defaults");
        assert!(config.debug);
        assert_eq!(config.history.max_entries, 10);
        // Defaults for unspecified fields
        assert_eq!(config.history.storage_key, "navHistory");
        assert!(config.auth.allowed_users.is_empty());
    }

    #[test]
    fn merge_overrides_non_default() {
        let mut base = NavConfig::default();
        let overlay = NavConfig {
            debug: true,
            history: HistoryConfig {
                max_entries: 5,
                ..Default::default()
            },
            ..Default::default()
        };

        base.merge(&overlay);

        assert!(base.debug);
        assert_eq!(base.history.max_entries, 5);
        assert_eq!(base.history.storage_key, "navHistory");
    }

    #[test]
    fn merge_keeps_base_when_overlay_is_default() {
        let mut base = NavConfig {
            debug: true,
            paths: PathsConfig {
                content_file: Some(PathBuf::from("cards.json")),
                ..Default::default()
            },
            ..Default::default()
        };

        base.merge(&NavConfig::default());

        assert!(base.debug);
        assert_eq!(base.paths.content_file, Some(PathBuf::from("cards.json")));
    }

    #[test]
    fn allow_list_overlay_replaces() {
        let mut base = NavConfig::default();
        base.auth.allowed_users = vec!["alice".into(), "bob".into()];

        let mut overlay = NavConfig::default();
        overlay.auth.allowed_users = vec!["carol".into()];
        base.merge(&overlay);

        assert_eq!(base.auth.allowed_users, ["carol"]);
    }

    #[test]
    fn allow_set_modes() {
        let open = AuthConfig::default().allow_set().unwrap();
        assert!(open.is_open());

        let closed = AuthConfig {
            allowed_users: vec!["alice".into()],
        }
        .allow_set()
        .unwrap();
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn validate_rejects_zero_capacity() {
        let mut config = NavConfig::default();
        config.history.max_entries = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref field, .. }) if field == "history.max_entries"
        ));
    }

    #[test]
    fn validate_rejects_bad_storage_key() {
        let mut config = NavConfig::default();
        config.history.storage_key = "nav/history".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_handle() {
        let mut config = NavConfig::default();
        config.auth.allowed_users = vec!["alice".into(), "  ".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref field, .. }) if field == "auth.allowed_users"
        ));
    }
}
