// crates/core/src/handle.rs
//! Opaque correlation handle linking a submitted task to its progress entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a submitted task.
///
/// Minted once at submission time, then used only as a lookup key. Two
/// concurrently live tasks never share a handle (random UUID v4), so progress
/// written under one handle can never bleed into another task's polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(Uuid);

impl TaskHandle {
    /// Mint a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskHandle {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let a = TaskHandle::new();
        let b = TaskHandle::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let handle = TaskHandle::new();
        let parsed: TaskHandle = handle.to_string().parse().unwrap();
        assert_eq!(handle, parsed);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-handle".parse::<TaskHandle>().is_err());
    }

    #[test]
    fn serializes_as_bare_string() {
        let handle = TaskHandle::new();
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, format!("\"{handle}\""));
    }
}
