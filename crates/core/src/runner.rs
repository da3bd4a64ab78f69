// crates/core/src/runner.rs
//! Task submission and background execution.
//!
//! [`TaskRunner::submit`] mints a fresh [`TaskHandle`], spawns the work on the
//! Tokio runtime, and returns the handle without waiting for anything. The
//! spawned worker honors the progress contract: write `Count(index + 1)` after
//! each processed item, then exactly one terminal entry (`Done` or `Failed`).

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::ProcessError;
use crate::handle::TaskHandle;
use crate::store::{ProgressEntry, ProgressStore};

/// Dispatches submitted tasks to background workers.
///
/// Holds the shared [`ProgressStore`] all workers write to, plus an optional
/// cap on how many tasks run at once. Cheap to share via `Arc`.
pub struct TaskRunner {
    store: Arc<dyn ProgressStore>,
    limiter: Option<Arc<Semaphore>>,
    submitted: AtomicU64,
}

impl TaskRunner {
    /// Create a runner with no limit on concurrently running tasks.
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self {
            store,
            limiter: None,
            submitted: AtomicU64::new(0),
        }
    }

    /// Create a runner that lets at most `max_concurrent` tasks run at once.
    ///
    /// Submission still returns immediately; excess tasks queue on the
    /// limiter and start in submission order.
    pub fn with_max_concurrent(store: Arc<dyn ProgressStore>, max_concurrent: usize) -> Self {
        Self {
            store,
            limiter: Some(Arc::new(Semaphore::new(max_concurrent))),
            submitted: AtomicU64::new(0),
        }
    }

    /// Number of tasks accepted since this runner was created (running or
    /// finished; submission increments this before the worker starts).
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Submit a bounded sequence of items for background processing.
    ///
    /// Returns the task's handle immediately — this call never blocks on the
    /// work itself and writes nothing to the store. The spawned worker invokes
    /// `processor` per item in order, records the completed count after each
    /// item, and finishes with a single terminal entry: `Done` after the last
    /// item (immediately, for empty input), or `Failed` with the processor's
    /// message if any item errors. Items after a failed one are not processed.
    pub fn submit<T, F, Fut>(&self, items: Vec<T>, processor: F) -> TaskHandle
    where
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ProcessError>> + Send + 'static,
    {
        let handle = TaskHandle::new();
        self.submitted.fetch_add(1, Ordering::Relaxed);
        let store = Arc::clone(&self.store);
        let limiter = self.limiter.clone();
        let total = items.len();

        tokio::spawn(async move {
            let _permit = match limiter {
                Some(semaphore) => match semaphore.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(e) => {
                        tracing::error!(handle = %handle, "concurrency limiter closed: {e}");
                        store.set(handle, ProgressEntry::Failed("executor unavailable".into()));
                        return;
                    }
                },
                None => None,
            };

            tracing::debug!(handle = %handle, total, "task started");
            for (index, item) in items.into_iter().enumerate() {
                if let Err(err) = processor(item).await {
                    tracing::warn!(handle = %handle, index, error = %err, "task aborted");
                    store.set(handle, ProgressEntry::Failed(err.to_string()));
                    return;
                }
                store.set(handle, ProgressEntry::Count(index as u64 + 1));
            }
            store.set(handle, ProgressEntry::Done);
            tracing::debug!(handle = %handle, total, "task complete");
        });

        handle
    }
}
