//! One fully wired browsing session.
//!
//! [`NavSession`] builds every collaborator from a [`NavConfig`]:
//!
//! ```text
//! NavConfig ──► LocalFileStore (session dir)
//!                 ├──► HistoryLedger (navHistory)
//!                 └──► LocalIdentityProvider (authUser)
//!                          └──► AccessGate (allow-set)
//!           ──► CardDeck (content file or built-in)
//!                          ═══► Navigator
//! ```

use crate::config::NavConfig;
use crate::content::CardDeck;
use crate::error::NavError;
use crate::history::HistoryLedger;
use crate::identity::LocalIdentityProvider;
use crate::navigator::Navigator;
use crate::routing::RouteTable;
use crate::session::LocalFileStore;
use cardnav_auth::AccessGate;
use cardnav_types::{Handle, SessionId};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// A navigator plus the session storage and identity provider behind it.
#[derive(Debug)]
pub struct NavSession {
    session_id: SessionId,
    store: Arc<LocalFileStore>,
    provider: Arc<LocalIdentityProvider>,
    navigator: Navigator,
}

impl NavSession {
    /// Opens (or resumes) `session_id` under the configured session root.
    ///
    /// # Errors
    ///
    /// Fails if the session directory cannot be created, the allow-list
    /// holds a blank handle, or the configured content file cannot be
    /// loaded.
    pub fn open(config: &NavConfig, session_id: SessionId) -> Result<Self, NavError> {
        let store = Arc::new(LocalFileStore::new(
            config.paths.session_dir_or_default(),
            &session_id,
        )?);

        let content = match config.paths.content_file {
            Some(ref path) => CardDeck::load(path)?,
            None => CardDeck::builtin(),
        };

        let policy = config.auth.allow_set()?;
        let provider = Arc::new(LocalIdentityProvider::restore(store.clone()));
        let gate = Arc::new(AccessGate::new(policy, provider.clone()));
        let ledger = HistoryLedger::restore_with_config(store.clone(), &config.history);

        debug!(
            session = %session_id,
            dir = %store.session_dir().display(),
            entries = ledger.len(),
            "Opened navigation session"
        );

        Ok(Self {
            session_id,
            store,
            provider,
            navigator: Navigator::new(ledger, gate, content, RouteTable::new()),
        })
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn session_dir(&self) -> &Path {
        self.store.session_dir()
    }

    /// Signs in as `handle` through the access gate.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Auth`] if the provider rejects the sign-in.
    pub async fn login(&self, handle: Handle) -> Result<(), NavError> {
        self.provider.set_credential(Some(handle));
        let result = self.navigator.gate().login().await;
        self.provider.set_credential(None);
        result?;
        Ok(())
    }

    /// Signs out. Failures are logged by the gate and not returned.
    pub async fn logout(&self) {
        self.navigator.gate().logout().await;
    }

    /// Ends the session: deletes its directory and everything stored in it.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Storage`] if the directory cannot be removed.
    pub fn end(self) -> Result<(), NavError> {
        self.store.purge()?;
        info!(session = %self.session_id, "Session ended");
        Ok(())
    }
}
