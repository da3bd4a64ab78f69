// crates/core/src/error.rs
use thiserror::Error;

/// Error returned by a task's per-item processor.
///
/// Carries a human-readable message that ends up in the task's terminal
/// [`ProgressEntry::Failed`](crate::store::ProgressEntry::Failed) entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ProcessError(String);

impl ProcessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProcessError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for ProcessError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}
