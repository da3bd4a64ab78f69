// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use taskpoll_core::{MemoryStore, ProgressQuery, ProgressStore, TaskRunner};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Dispatches submitted work to background workers.
    pub runner: TaskRunner,
    /// Read-only progress view for the polling endpoints.
    pub query: ProgressQuery,
    /// Configured cap on concurrently running tasks, if any.
    pub max_concurrent: Option<usize>,
}

impl AppState {
    /// Create state backed by a fresh in-memory store, with no limit on
    /// concurrently running tasks.
    pub fn new() -> Arc<Self> {
        Self::with_store(Arc::new(MemoryStore::new()), None)
    }

    /// Create state over an externally-provided store (for testing and for
    /// embedders that want their own eviction policy), optionally capping the
    /// number of tasks running at once.
    pub fn with_store(store: Arc<dyn ProgressStore>, max_concurrent: Option<usize>) -> Arc<Self> {
        let runner = match max_concurrent {
            Some(max) => TaskRunner::with_max_concurrent(Arc::clone(&store), max),
            None => TaskRunner::new(Arc::clone(&store)),
        };
        Arc::new(Self {
            start_time: Instant::now(),
            runner,
            query: ProgressQuery::new(store),
            max_concurrent,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new();
        assert!(state.uptime_secs() < 1);
    }

    #[tokio::test]
    async fn test_runner_and_query_share_one_store() {
        let state = AppState::new();

        let handle = state.runner.submit(Vec::<u32>::new(), |_| async { Ok(()) });

        // Empty input transitions straight to Done; poll until visible.
        let status = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                match state.query.percent(handle, 1) {
                    taskpoll_core::PollStatus::Unknown => {
                        tokio::time::sleep(std::time::Duration::from_millis(2)).await
                    }
                    status => return status,
                }
            }
        })
        .await
        .expect("task never became visible");

        assert_eq!(status, taskpoll_core::PollStatus::Done);
    }
}
