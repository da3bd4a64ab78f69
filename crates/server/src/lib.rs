// crates/server/src/lib.rs
//! Taskpoll server library.
//!
//! Axum-based HTTP transport over `taskpoll-core`: a submission endpoint that
//! returns a task handle immediately, and polling/SSE endpoints that report
//! percentage complete until the task reaches a terminal state.

pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, tasks)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app() -> Router {
    create_app_with_state(AppState::new())
}

/// Create the application over an externally-provided state (for testing and
/// for callers that configure the store or concurrency limit themselves).
pub fn create_app_with_state(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
