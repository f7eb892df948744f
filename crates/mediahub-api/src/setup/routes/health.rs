//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - every category directory is present.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let (status_code, storage) =
        match tokio::time::timeout(TIMEOUT, state.store.check_ready()).await {
            Ok(Ok(())) => (StatusCode::OK, "ready".to_string()),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Storage readiness check failed");
                (StatusCode::SERVICE_UNAVAILABLE, format!("not_ready: {}", e))
            }
            Err(_) => {
                tracing::error!("Storage readiness check timed out");
                (StatusCode::SERVICE_UNAVAILABLE, "timeout".to_string())
            }
        };

    let status = if status_code == StatusCode::OK {
        "ready"
    } else {
        "not_ready"
    };

    (
        status_code,
        Json(serde_json::json!({ "status": status, "storage": storage })),
    )
}
