use cardnav_types::PageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One visit in the ledger.
///
/// Serialized as `{"pageId": "...", "timestamp": <epoch millis>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    page_id: PageId,
    timestamp: i64,
}

impl HistoryEntry {
    /// Creates an entry visited at `timestamp` (milliseconds since the epoch).
    #[must_use]
    pub fn new(page_id: PageId, timestamp: i64) -> Self {
        Self { page_id, timestamp }
    }

    #[must_use]
    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The visit time, if the timestamp is within chrono's range.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
