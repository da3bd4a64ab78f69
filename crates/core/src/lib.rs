// crates/core/src/lib.rs
//! Background task execution with pollable progress.
//!
//! A caller submits a bounded sequence of items plus a per-item processor to
//! [`TaskRunner::submit`] and gets back a [`TaskHandle`] immediately. The work
//! runs on the Tokio runtime; after each item the worker writes its completed
//! count to a shared [`ProgressStore`], and [`ProgressQuery`] turns store reads
//! into a percentage or a terminal status for any number of pollers.

pub mod error;
pub mod handle;
pub mod query;
pub mod runner;
pub mod store;

pub use error::ProcessError;
pub use handle::TaskHandle;
pub use query::{PollStatus, ProgressQuery};
pub use runner::TaskRunner;
pub use store::{MemoryStore, ProgressEntry, ProgressStore};
