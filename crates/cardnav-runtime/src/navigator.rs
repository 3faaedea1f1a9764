//! The hosting view: routes, gates, records, renders.
//!
//! Per navigation event:
//!
//! ```text
//! path ──► RouteTable::resolve ──► Route
//!                                   │
//!        ┌──────────────────────────┼───────────────────────┐
//!        ▼                          ▼                       ▼
//!   Card(page_id)              privileged                Missing
//!        │                          │                       │
//!   ledger.append(page_id)     gate.is_authorized()?        │
//!        │                     yes │        no │            │
//!   content.card(page_id)          ▼           └──────────► View::Missing
//!   Some ─► View::Card         View::Upload / Admin / AdminGraph
//!   None ─► View::Missing
//! ```

use crate::content::{Card, CardDeck, ContentStore};
use crate::history::{HistoryEntry, HistoryLedger};
use crate::routing::{Route, RouteTable};
use cardnav_auth::{AccessGate, AccessPolicy, AllowSet};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// What the navigator decided to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Card(Card),
    Missing,
    Upload,
    Admin,
    AdminGraph,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(card) => {
                write!(f, "# {}", card.title)?;
                if !card.body.is_empty() {
                    write!(f, "\n\n{}", card.body)?;
                }
                if !card.links.is_empty() {
                    let links: Vec<String> = card.links.iter().map(|l| format!("/{l}")).collect();
                    write!(f, "\n\nLinks: {}", links.join(" "))?;
                }
                Ok(())
            }
            Self::Missing => f.write_str("Page not found"),
            Self::Upload => f.write_str("# Upload"),
            Self::Admin => f.write_str("# Admin"),
            Self::AdminGraph => f.write_str("# Admin: graph"),
        }
    }
}

/// Ties the ledger, gate and content store together for one session.
///
/// The ledger sits behind a lock so a navigator can be shared through an
/// `Arc`; operations are still meant to run one at a time.
pub struct Navigator<C: ContentStore = CardDeck, P: AccessPolicy = AllowSet> {
    ledger: Mutex<HistoryLedger>,
    gate: Arc<AccessGate<P>>,
    content: C,
    routes: RouteTable,
}

impl<C: ContentStore, P: AccessPolicy> Navigator<C, P> {
    pub fn new(
        ledger: HistoryLedger,
        gate: Arc<AccessGate<P>>,
        content: C,
        routes: RouteTable,
    ) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            gate,
            content,
            routes,
        }
    }

    /// Resolves `path` and renders it.
    pub fn navigate(&self, path: &str) -> View {
        let route = self.routes.resolve(path);
        debug!(path, route = %route, "Navigating");
        self.render(route)
    }

    /// Renders an already-resolved route.
    ///
    /// Card routes are recorded in the ledger before lookup, so unknown ids
    /// still appear in history. Privileged routes the gate rejects render as
    /// [`View::Missing`].
    pub fn render(&self, route: Route) -> View {
        match route {
            Route::Card(page_id) => {
                self.ledger.lock().append(page_id.clone());
                self.content
                    .card(&page_id)
                    .map_or(View::Missing, View::Card)
            }
            Route::Missing => View::Missing,
            privileged @ (Route::Upload | Route::Admin | Route::AdminGraph)
                if !self.gate.is_authorized() =>
            {
                info!(route = %privileged, state = %self.gate.state(), "Access denied");
                View::Missing
            }
            Route::Upload => View::Upload,
            Route::Admin => View::Admin,
            Route::AdminGraph => View::AdminGraph,
        }
    }

    /// Truncates history after `index` and renders the new tip.
    ///
    /// The tip is shown without being appended again. Returns `None` when
    /// the jump leaves the ledger empty.
    pub fn jump(&self, index: i64) -> Option<View> {
        let tip = {
            let mut ledger = self.ledger.lock();
            ledger.go_to_history_index(index);
            ledger.current().map(|entry| entry.page_id().clone())
        };

        tip.map(|page_id| {
            self.content
                .card(&page_id)
                .map_or(View::Missing, View::Card)
        })
    }

    /// Empties the history and its stored copy.
    pub fn clear_history(&self) {
        self.ledger.lock().clear();
    }

    /// Snapshot of the history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.ledger.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn gate(&self) -> &Arc<AccessGate<P>> {
        &self.gate
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

impl<C: ContentStore, P: AccessPolicy> fmt::Debug for Navigator<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("ledger", &*self.ledger.lock())
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
