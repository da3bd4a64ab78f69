// crates/core/src/query.rs
//! Derived progress reads for pollers.

use std::sync::Arc;

use crate::handle::TaskHandle;
use crate::store::{ProgressEntry, ProgressStore};

/// Outcome of a single progress poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    /// Task is in flight; percentage complete in `[0, 100]`.
    Percent(u8),
    /// Task finished every item.
    Done,
    /// Task aborted; carries the failure message.
    Failed(String),
    /// Handle has no entry yet (not started, or never submitted).
    Unknown,
}

/// Read-only view over a [`ProgressStore`] that turns entries into
/// caller-facing percentages.
///
/// Holds no state of its own and never writes; any number of pollers may
/// share one query (or clone it) and call [`percent`](Self::percent) on
/// whatever cadence they like.
#[derive(Clone)]
pub struct ProgressQuery {
    store: Arc<dyn ProgressStore>,
}

impl ProgressQuery {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Percentage complete for `handle`, given the item count the caller
    /// submitted.
    ///
    /// `total == 0` short-circuits to [`PollStatus::Done`] — zero items means
    /// nothing to do, and the division is never performed. Counts are floored
    /// and clamped so the result always lands in `[0, 100]`.
    pub fn percent(&self, handle: TaskHandle, total: u64) -> PollStatus {
        if total == 0 {
            return PollStatus::Done;
        }
        match self.store.get(handle) {
            None => PollStatus::Unknown,
            Some(ProgressEntry::Done) => PollStatus::Done,
            Some(ProgressEntry::Failed(message)) => PollStatus::Failed(message),
            Some(ProgressEntry::Count(count)) => {
                let percent = (count.saturating_mul(100) / total).min(100) as u8;
                PollStatus::Percent(percent)
            }
        }
    }
}
