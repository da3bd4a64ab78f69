// crates/core/src/store.rs
//! Shared progress state keyed by task handle.
//!
//! One writer (the task's worker) and any number of polling readers share a
//! [`ProgressStore`]. The store holds no business logic: it maps a
//! [`TaskHandle`] to the latest [`ProgressEntry`] and guarantees that a
//! terminal entry, once written, is never overwritten.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::handle::TaskHandle;

/// Current progress of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEntry {
    /// Items completed so far. Monotonically non-decreasing for a given
    /// handle while the task runs, bounded by the submitted item count.
    Count(u64),
    /// Terminal marker: the task finished every item.
    Done,
    /// Terminal marker: the task aborted; carries the processor's message.
    Failed(String),
}

impl ProgressEntry {
    /// Whether this entry is terminal (`Done` or `Failed`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressEntry::Count(_))
    }
}

/// Key-value store mapping task handles to progress entries.
///
/// Implementations must tolerate one writer per handle running concurrently
/// with many readers, and must never let a reader observe an earlier value
/// after a later one (monotonic visibility). Injected explicitly wherever
/// progress is written or read — never process-global state.
pub trait ProgressStore: Send + Sync {
    /// Write the latest entry for a handle. Entries are created implicitly on
    /// first write. Writes after a terminal entry must be dropped.
    fn set(&self, handle: TaskHandle, entry: ProgressEntry);

    /// Read the latest entry for a handle. `None` means the handle is unknown
    /// (not yet started, or never submitted) — a valid outcome, not an error.
    fn get(&self, handle: TaskHandle) -> Option<ProgressEntry>;
}

/// In-memory [`ProgressStore`] for a single process.
///
/// Uses `std::sync::RwLock` (not `tokio::sync::RwLock`): the lock is never
/// held across an `.await` point and reads are uncontended between poll
/// cycles.
pub struct MemoryStore {
    entries: RwLock<HashMap<TaskHandle, ProgressEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for MemoryStore {
    fn set(&self, handle: TaskHandle, entry: ProgressEntry) {
        match self.entries.write() {
            Ok(mut entries) => {
                if entries.get(&handle).is_some_and(ProgressEntry::is_terminal) {
                    tracing::warn!(handle = %handle, ?entry, "dropping write after terminal entry");
                    return;
                }
                entries.insert(handle, entry);
            }
            Err(e) => tracing::error!("RwLock poisoned writing progress entry: {e}"),
        }
    }

    fn get(&self, handle: TaskHandle) -> Option<ProgressEntry> {
        match self.entries.read() {
            Ok(entries) => entries.get(&handle).cloned(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading progress entry: {e}");
                None
            }
        }
    }
}
