// crates/server/src/routes/health.rs
//! Liveness endpoint, reporting uptime plus task-dispatch counters.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Snapshot returned by `GET /api/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Tasks accepted since the server started.
    pub tasks_submitted: u64,
    /// Configured cap on concurrently running tasks; absent when unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<usize>,
}

/// GET /api/health — liveness plus a coarse view of dispatcher activity,
/// so an operator can tell an idle server from one churning through tasks.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        tasks_submitted: state.runner.submitted(),
        max_concurrent: state.max_concurrent,
    })
}

/// Build the health sub-router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::{create_app, create_app_with_state};

    #[test]
    fn response_uses_camel_case_and_omits_unset_cap() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            tasks_submitted: 7,
            max_concurrent: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"uptimeSecs\":42"));
        assert!(json.contains("\"tasksSubmitted\":7"));
        assert!(!json.contains("maxConcurrent"));

        let response = HealthResponse {
            max_concurrent: Some(4),
            ..response
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"maxConcurrent\":4"));
    }

    #[tokio::test]
    async fn submitted_count_shows_up_after_a_submission() {
        let app = create_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"items":[1,2]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["tasksSubmitted"], 1);
        assert!(json.get("maxConcurrent").is_none());
    }

    #[tokio::test]
    async fn configured_cap_is_reported() {
        use crate::state::AppState;
        use taskpoll_core::MemoryStore;

        let state = AppState::with_store(Arc::new(MemoryStore::new()), Some(3));
        let app = create_app_with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["maxConcurrent"], 3);
        assert_eq!(json["tasksSubmitted"], 0);
    }
}
