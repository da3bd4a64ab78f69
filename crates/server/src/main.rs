// crates/server/src/main.rs
//! Taskpoll server binary.
//!
//! Binds the HTTP listener and serves the task submission and progress
//! polling API. Configuration comes from environment variables:
//! `TASKPOLL_PORT` (or `PORT`) for the listen port, and
//! `TASKPOLL_MAX_CONCURRENT` to cap how many tasks run at once.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use taskpoll_core::MemoryStore;
use taskpoll_server::{create_app_with_state, AppState};

/// Default port for the server.
const DEFAULT_PORT: u16 = 47311;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("TASKPOLL_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Optional cap on concurrently running tasks.
fn get_max_concurrent() -> Option<usize> {
    std::env::var("TASKPOLL_MAX_CONCURRENT")
        .ok()
        .and_then(|n| n.parse().ok())
        .filter(|&n| n > 0)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let max_concurrent = get_max_concurrent();
    let state = AppState::with_store(Arc::new(MemoryStore::new()), max_concurrent);
    let app = create_app_with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], get_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, ?max_concurrent, "taskpoll server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
