//! Navigation history ledger.
//!
//! An ordered, capped, session-persisted stack of visited pages. Jumping
//! back truncates everything after the target, so the next visit starts a
//! new branch. There is no redo.
//!
//! ```text
//!   append(a) append(b) append(c) append(d)     [a, b, c, d]
//!   go_to_history_index(1)                      [a, b]
//!   append(e)                                   [a, b, e]
//! ```
//!
//! | Operation | Persistence |
//! |-----------|-------------|
//! | `append` | full sequence written under the storage key |
//! | `go_to_history_index` | full sequence written |
//! | `clear` | storage key removed |
//!
//! Persistence is best-effort. A failing store is logged and the in-memory
//! ledger stays authoritative.

mod entry;
mod ledger;

pub use entry::HistoryEntry;
pub use ledger::HistoryLedger;

/// Default maximum number of retained entries.
pub const MAX_LENGTH: usize = 50;

/// Default session store key for the serialized ledger.
pub const DEFAULT_STORAGE_KEY: &str = "navHistory";
