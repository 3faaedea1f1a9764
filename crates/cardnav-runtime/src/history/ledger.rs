use super::{HistoryEntry, DEFAULT_STORAGE_KEY, MAX_LENGTH};
use crate::config::HistoryConfig;
use crate::session::SessionStore;
use cardnav_types::{PageId, TryNew};
use chrono::Utc;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Session-scoped navigation history.
///
/// Entries are ordered oldest first and never exceed
/// [`capacity`](Self::capacity); when an append overflows, the oldest
/// entries are dropped. Consecutive duplicates are kept as-is.
///
/// Every mutation writes the full sequence to the session store before
/// returning. Write failures are logged at `warn` and otherwise ignored.
///
/// # Example
///
/// ```
/// use cardnav_runtime::history::HistoryLedger;
/// use cardnav_runtime::session::MemoryStore;
/// use cardnav_types::{PageId, TryNew};
/// use std::sync::Arc;
///
/// let mut ledger = HistoryLedger::restore(Arc::new(MemoryStore::new()));
/// for id in ["a", "b", "c", "d"] {
///     ledger.append(PageId::try_new(id.to_string()).unwrap());
/// }
///
/// ledger.go_to_history_index(1);
/// ledger.append_raw(Some("e"));
///
/// let ids: Vec<_> = ledger.page_ids().map(PageId::as_str).collect();
/// assert_eq!(ids, ["a", "b", "e"]);
/// ```
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    storage_key: String,
    store: Arc<dyn SessionStore>,
}

impl HistoryLedger {
    /// Rehydrates the ledger from `store` with the default capacity and key.
    ///
    /// A missing or unparsable stored value yields an empty ledger.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        Self::restore_with(store, MAX_LENGTH, DEFAULT_STORAGE_KEY)
    }

    /// Rehydrates the ledger using the configured capacity and key.
    pub fn restore_with_config(store: Arc<dyn SessionStore>, config: &HistoryConfig) -> Self {
        Self::restore_with(store, config.max_entries, &config.storage_key)
    }

    fn restore_with(store: Arc<dyn SessionStore>, capacity: usize, storage_key: &str) -> Self {
        let capacity = capacity.max(1);
        let mut entries = load_entries(store.as_ref(), storage_key);

        // A larger ledger written under a bigger capacity keeps its newest tail.
        if entries.len() > capacity {
            let excess = entries.len() - capacity;
            entries.drain(..excess);
        }

        debug!(
            key = storage_key,
            entries = entries.len(),
            capacity,
            "Restored navigation history"
        );

        Self {
            entries,
            capacity,
            storage_key: storage_key.to_string(),
            store,
        }
    }

    /// Records a visit to `page_id` at the current time.
    ///
    /// Drops the oldest entries while the ledger is over capacity, then
    /// persists.
    pub fn append(&mut self, page_id: PageId) {
        let now = Utc::now().timestamp_millis();
        // Wall clocks can step backwards; the ledger never does.
        let timestamp = self
            .entries
            .back()
            .map_or(now, |last| now.max(last.timestamp()));

        self.entries.push_back(HistoryEntry::new(page_id, timestamp));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }

        self.persist();
    }

    /// Records a visit from unvalidated input.
    ///
    /// `None` and the empty string are silently ignored: nothing is
    /// recorded and nothing is written.
    pub fn append_raw(&mut self, page_id: Option<&str>) {
        let Some(raw) = page_id else {
            return;
        };
        match PageId::try_new(raw.to_string()) {
            Ok(id) => self.append(id),
            Err(_) => debug!("Ignoring empty page id"),
        }
    }

    /// Empties the ledger and removes the stored value entirely.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove_item(&self.storage_key) {
            warn!(key = %self.storage_key, error = %e, "Failed to remove navigation history");
        }
    }

    /// Keeps entries `0..=index` and discards everything after.
    ///
    /// A negative index empties the ledger; an index at or past the tip
    /// leaves it unchanged. Never panics. Persists in every case.
    pub fn go_to_history_index(&mut self, index: i64) {
        match usize::try_from(index) {
            Ok(index) => {
                let keep = index.saturating_add(1);
                if keep < self.entries.len() {
                    self.entries.truncate(keep);
                }
            }
            Err(_) => self.entries.clear(),
        }

        self.persist();
    }

    /// Writes the full sequence to the session store.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize navigation history");
                return;
            }
        };

        if let Err(e) = self.store.set_item(&self.storage_key, &json) {
            warn!(key = %self.storage_key, error = %e, "Failed to persist navigation history");
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Page ids in visit order.
    pub fn page_ids(&self) -> impl Iterator<Item = &PageId> {
        self.entries.iter().map(HistoryEntry::page_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl fmt::Debug for HistoryLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryLedger")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

/// Reads the stored sequence. Anything unreadable counts as empty.
fn load_entries(store: &dyn SessionStore, key: &str) -> VecDeque<HistoryEntry> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return VecDeque::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read navigation history, starting empty");
            return VecDeque::new();
        }
    };

    match serde_json::from_str::<VecDeque<HistoryEntry>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed navigation history");
            VecDeque::new()
        }
    }
}
