//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! Configuration is loaded from multiple sources with priority-based merging:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────────┐
//! │  1. CLI flags (ConfigResolver)               │  Per invocation
//! ├──────────────────────────────────────────────┤
//! │  2. Environment Variables (CARDNAV_*)        │  Runtime override
//! ├──────────────────────────────────────────────┤
//! │  3. Project Config (.cardnav/config.toml)    │  Project-specific
//! ├──────────────────────────────────────────────┤
//! │  4. Global Config (~/.cardnav/config.toml)   │  User defaults
//! ├──────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)            │  Fallback
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Directory Structure
//!
//! ```text
//! ~/.cardnav/                  # Global directory
//! ├── config.toml              # Global configuration
//! └── sessions/                # Session data (separate from config)
//!     └── {session-id}/
//!         ├── navHistory.json
//!         └── authUser.json
//!
//! <project>/.cardnav/
//! └── config.toml              # Project configuration (overrides global)
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `CARDNAV_DEBUG` | `debug` | bool |
//! | `CARDNAV_ALLOWED_USERS` | `auth.allowed_users` | comma separated |
//! | `CARDNAV_MAX_HISTORY` | `history.max_entries` | usize |
//! | `CARDNAV_SESSION_PATH` | `paths.session_dir` | PathBuf |
//! | `CARDNAV_CONTENT` | `paths.content_file` | PathBuf |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.cardnav/config.toml
//! debug = false
//!
//! [auth]
//! allowed_users = ["octocat", "hubot"]
//!
//! [history]
//! max_entries = 50
//! storage_key = "navHistory"
//!
//! [paths]
//! session_dir = "~/.cardnav/sessions"
//! content_file = "cards.json"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{AuthConfig, HistoryConfig, NavConfig, PathsConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".cardnav")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".cardnav";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
