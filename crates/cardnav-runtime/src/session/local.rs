//! Local file-based session storage.
//!
//! Each session gets its own directory; each key is one JSON file:
//!
//! ```text
//! ~/.cardnav/sessions/
//! ├── default/
//! │   ├── navHistory.json
//! │   └── authUser.json
//! └── 550e8400-e29b-41d4-a716-446655440000/
//!     └── navHistory.json
//! ```

use super::{is_valid_key, SessionStore, StorageError};
use cardnav_types::SessionId;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed session store for one session.
///
/// # Features
///
/// - Atomic writes (write to temp, then rename)
/// - Automatic directory creation
/// - [`purge`](Self::purge) deletes the whole session directory, which ends
///   the session's persisted state
///
/// # Example
///
/// ```no_run
/// use cardnav_runtime::session::{LocalFileStore, SessionStore};
/// use cardnav_types::{SessionId, TryNew};
/// use std::path::PathBuf;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = SessionId::try_new("default".to_string())?;
/// let store = LocalFileStore::new(PathBuf::from("~/.cardnav/sessions"), &session)?;
/// store.set_item("navHistory", "[]")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Directory holding this session's key files.
    session_dir: PathBuf,
}

impl LocalFileStore {
    /// Opens (creating if needed) the directory for `session` under `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DirectoryCreation` if the directory cannot be created.
    pub fn new(root: PathBuf, session: &SessionId) -> Result<Self, StorageError> {
        let session_dir = expand_tilde(&root).join(session.as_str());

        if !session_dir.exists() {
            std::fs::create_dir_all(&session_dir)
                .map_err(|e| StorageError::directory_creation(&session_dir, e))?;
            debug!(path = %session_dir.display(), "Created session directory");
        }

        Ok(Self { session_dir })
    }

    /// Returns the session directory.
    #[must_use]
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// Deletes the session directory and everything in it.
    ///
    /// Later writes through this store recreate nothing and fail with
    /// `StorageError::Io`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if removal fails for a reason other than
    /// the directory already being gone.
    pub fn purge(&self) -> Result<(), StorageError> {
        match std::fs::remove_dir_all(&self.session_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::invalid_key(key));
        }
        Ok(self.session_dir.join(format!("{key}.json")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.session_dir.join(format!(".{key}.json.tmp"))
    }
}

impl SessionStore for LocalFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        let temp_path = self.temp_path(key);

        // Write to temp file first (atomic write pattern)
        std::fs::write(&temp_path, value)?;
        if let Err(e) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Expands `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}

/// Returns the default session storage root.
#[must_use]
pub fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cardnav")
        .join("sessions")
}
