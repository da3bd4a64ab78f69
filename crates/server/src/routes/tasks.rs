// crates/server/src/routes/tasks.rs
//! Task submission and progress polling endpoints.
//!
//! - `POST /api/tasks` — submit a batch of items for background processing
//! - `GET  /api/tasks/{handle}/progress?total=N` — JSON snapshot (for polling)
//! - `GET  /api/tasks/{handle}/stream?total=N`   — SSE stream of progress events

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use taskpoll_core::{PollStatus, TaskHandle};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound on items per submission.
const MAX_ITEMS: usize = 10_000;

/// Upper bound on the simulated per-item delay.
const MAX_DELAY_MS: u64 = 60_000;

/// Body for `POST /api/tasks`.
///
/// Each item is an opaque JSON value; the worker "processes" it by sleeping
/// `delayMs` (simulated long-running work) and logging it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

/// Response for `POST /api/tasks`. The caller keeps `total` and supplies it
/// back on every progress query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub handle: TaskHandle,
    pub total: u64,
}

/// Query string for the progress endpoints.
#[derive(Debug, Deserialize)]
pub struct ProgressParams {
    pub total: u64,
}

/// JSON snapshot of a task's progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl From<PollStatus> for ProgressResponse {
    fn from(status: PollStatus) -> Self {
        match status {
            PollStatus::Percent(p) => Self {
                status: "running".to_string(),
                percent: Some(p),
                error_message: None,
            },
            PollStatus::Done => Self {
                status: "done".to_string(),
                percent: Some(100),
                error_message: None,
            },
            PollStatus::Failed(message) => Self {
                status: "failed".to_string(),
                percent: None,
                error_message: Some(message),
            },
            PollStatus::Unknown => Self {
                status: "unknown".to_string(),
                percent: None,
                error_message: None,
            },
        }
    }
}

fn parse_handle(raw: &str) -> ApiResult<TaskHandle> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid task handle: {raw}")))
}

/// POST /api/tasks — submit items for background processing.
///
/// Responds with the task handle immediately; the work runs out-of-band.
pub async fn submit_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    if req.items.len() > MAX_ITEMS {
        return Err(ApiError::BadRequest(format!(
            "too many items: {} (max {MAX_ITEMS})",
            req.items.len()
        )));
    }
    let delay_ms = req.delay_ms.unwrap_or(0);
    if delay_ms > MAX_DELAY_MS {
        return Err(ApiError::BadRequest(format!(
            "delayMs too large: {delay_ms} (max {MAX_DELAY_MS})"
        )));
    }

    let total = req.items.len() as u64;
    let delay = Duration::from_millis(delay_ms);
    let handle = state.runner.submit(req.items, move |item| async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        tracing::debug!(%item, "processed item");
        Ok(())
    });

    tracing::info!(handle = %handle, total, delay_ms, "task submitted");
    Ok(Json(SubmitResponse { handle, total }))
}

/// GET /api/tasks/{handle}/progress?total=N — lightweight JSON snapshot.
///
/// Designed for polling on a fixed interval; an unknown handle is a valid
/// `"unknown"` outcome (200), not an error.
pub async fn task_progress(
    State(state): State<Arc<AppState>>,
    Path(raw_handle): Path<String>,
    Query(params): Query<ProgressParams>,
) -> ApiResult<Json<ProgressResponse>> {
    let handle = parse_handle(&raw_handle)?;
    Ok(Json(state.query.percent(handle, params.total).into()))
}

/// SSE handler that streams progress events for one task.
///
/// Polls the store on a fixed cadence and emits an event whenever the
/// percentage changes. The stream terminates after `done` or `failed`, or
/// after a watchdog timeout if the worker never reaches a terminal state.
pub async fn stream_progress(
    State(state): State<Arc<AppState>>,
    Path(raw_handle): Path<String>,
    Query(params): Query<ProgressParams>,
) -> ApiResult<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>> {
    let handle = parse_handle(&raw_handle)?;
    let query = state.query.clone();
    let total = params.total;

    let stream = async_stream::stream! {
        let started = std::time::Instant::now();
        // Safety net: a panicked worker never writes a terminal entry.
        let max_duration = Duration::from_secs(600);
        let mut last_percent: Option<u8> = None;

        loop {
            match query.percent(handle, total) {
                PollStatus::Unknown => {
                    // Not started yet, wait
                }
                PollStatus::Percent(percent) => {
                    if last_percent != Some(percent) {
                        let data = serde_json::json!({
                            "status": "running",
                            "percent": percent,
                        });
                        yield Ok(Event::default().event("progress").data(data.to_string()));
                        last_percent = Some(percent);
                    }
                }
                PollStatus::Done => {
                    let data = serde_json::json!({
                        "status": "done",
                        "percent": 100,
                    });
                    yield Ok(Event::default().event("done").data(data.to_string()));
                    break;
                }
                PollStatus::Failed(message) => {
                    let data = serde_json::json!({
                        "status": "failed",
                        "message": message,
                    });
                    yield Ok(Event::default().event("failed").data(data.to_string()));
                    break;
                }
            }

            if started.elapsed() > max_duration {
                let data = serde_json::json!({
                    "status": "error",
                    "message": "progress stream timed out",
                });
                yield Ok(Event::default().event("error").data(data.to_string()));
                break;
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    };

    Ok(Sse::new(stream))
}

/// Build the tasks sub-router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", post(submit_task))
        .route("/tasks/{handle}/progress", get(task_progress))
        .route("/tasks/{handle}/stream", get(stream_progress))
}

// =============================================================================
// Tests
// =============================================================================
