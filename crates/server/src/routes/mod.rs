//! API route handlers for the taskpoll server.

pub mod health;
pub mod tasks;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET  /api/health - Health check
/// - POST /api/tasks - Submit a batch of items for background processing
/// - GET  /api/tasks/{handle}/progress - JSON progress snapshot (polling)
/// - GET  /api/tasks/{handle}/stream - SSE stream of progress events
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", tasks::router())
        .with_state(state)
}
