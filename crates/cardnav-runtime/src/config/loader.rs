//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.cardnav/config.toml`)
//! 3. Project config (`.cardnav/config.toml`)
//! 4. Environment variables (`CARDNAV_*`)
//!
//! Each layer overrides the previous. The merged result is validated once,
//! after the last layer.
//!
//! File layers merge with [`NavConfig::merge`], which only takes values that
//! differ from the default. A project file therefore cannot reset a global
//! value back to its default: `max_entries = 50` leaves a global `20` in
//! place, and an empty `allowed_users` does not reopen a global allow-list.
//! Environment variables are assigned directly and can restore a default.

use super::{
    default_config_path, ConfigError, NavConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use cardnav_runtime::config::ConfigLoader;
///
/// # fn example() -> Result<(), cardnav_runtime::config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .skip_env_vars()
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.cardnav/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.cardnav/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any config file exists but cannot be parsed,
    /// an environment variable is malformed, or the merged config is invalid.
    /// Missing config files are silently ignored.
    pub fn load(&self) -> Result<NavConfig, ConfigError> {
        let mut config = NavConfig::default();

        // Layer 1: Global config
        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = self.load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        // Layer 2: Project config
        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = self.load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "Loaded project config"
                    );
                    config.merge(&project_config);
                }
            }
        }

        // Layer 3: Environment variables
        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &Path) -> Result<Option<NavConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config =
            NavConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }
}

/// Applies environment variable overrides.
fn apply_env_vars(config: &mut NavConfig) -> Result<(), ConfigError> {
    parse_env_bool!(config.debug, "CARDNAV_DEBUG");

    if let Ok(val) = std::env::var("CARDNAV_ALLOWED_USERS") {
        config.auth.allowed_users = parse_list(&val);
    }

    if let Ok(val) = std::env::var("CARDNAV_MAX_HISTORY") {
        config.history.max_entries = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid_env_var("CARDNAV_MAX_HISTORY", "expected integer"))?;
    }

    // Path environment variables
    if let Ok(val) = std::env::var("CARDNAV_SESSION_PATH") {
        config.paths.session_dir = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("CARDNAV_CONTENT") {
        config.paths.content_file = Some(PathBuf::from(val));
    }

    Ok(())
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Splits a comma separated list, dropping blank items.
fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, NavConfig::default());
    }

    #[test]
    fn load_global_config() {
        let temp = TempDir::new().unwrap();
        let config_path = create_config_file(
            temp.path(),
            r#"
debug = true

[auth]
allowed_users = ["octocat"]
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&config_path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert!(config.debug);
        assert_eq!(config.auth.allowed_users, ["octocat"]);
    }

    #[test]
    fn load_project_overrides_global() {
        let global_temp = TempDir::new().unwrap();
        let project_temp = TempDir::new().unwrap();

        let project_dir = project_temp.path().join(".cardnav");
        std::fs::create_dir_all(&project_dir).unwrap();

        let global_path = create_config_file(
            global_temp.path(),
            r#"
debug = true

[history]
max_entries = 20
"#,
        );

        create_config_file(
            &project_dir,
            r#"
[history]
max_entries = 8
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .unwrap();

        // debug from global (not overridden in project)
        assert!(config.debug);
        // max_entries from project (overrides global)
        assert_eq!(config.history.max_entries, 8);
    }

    #[test]
    fn project_cannot_reset_to_default() {
        let global_temp = TempDir::new().unwrap();
        let project_temp = TempDir::new().unwrap();

        let project_dir = project_temp.path().join(".cardnav");
        std::fs::create_dir_all(&project_dir).unwrap();

        let global_path = create_config_file(
            global_temp.path(),
            r#"
[auth]
allowed_users = ["octocat"]

[history]
max_entries = 20
"#,
        );

        create_config_file(
            &project_dir,
            r#"
[auth]
allowed_users = []

[history]
max_entries = 50
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.history.max_entries, 20);
        assert_eq!(config.auth.allowed_users, ["octocat"]);
    }

    #[test]
    fn missing_config_files_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, NavConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "debug = \"maybe\"");

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn zero_capacity_rejected_at_load() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "[history]\nmax_entries = 0\n");

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));

        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));

        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn parse_list_values() {
        assert_eq!(parse_list("alice, bob,,carol "), ["alice", "bob", "carol"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn env_var_override() {
        // Only test in this crate that touches CARDNAV_* variables.
        std::env::set_var("CARDNAV_DEBUG", "true");
        std::env::set_var("CARDNAV_ALLOWED_USERS", "alice,bob");
        std::env::set_var("CARDNAV_MAX_HISTORY", "12");

        let result = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .load();

        std::env::remove_var("CARDNAV_DEBUG");
        std::env::remove_var("CARDNAV_ALLOWED_USERS");
        std::env::remove_var("CARDNAV_MAX_HISTORY");

        let config = result.unwrap();
        assert!(config.debug);
        assert_eq!(config.auth.allowed_users, ["alice", "bob"]);
        assert_eq!(config.history.max_entries, 12);
    }
}
