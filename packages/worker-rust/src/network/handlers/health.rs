//! Health, liveness, and readiness endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use super::AppState;

/// Returns worker health information as JSON.
///
/// Always returns 200 -- the `state` field indicates whether the dispatch
/// entry point has actually been resolved.
pub async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ready = state.registry.entry_point_resolved();
    Json(json!({
        "state": if ready { "ready" } else { "starting" },
        "loaded_functions": state.registry.loaded_count(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// Liveness probe -- always returns 200 OK.
///
/// Only checks that the process is running and responsive; a failed
/// liveness probe triggers a restart, so it must not depend on load order.
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe -- 200 once the dispatch entry point is resolved, 503
/// before that. The host should not route invocations until ready.
pub async fn readiness_handler(State(state): State<AppState>) -> StatusCode {
    if state.registry.entry_point_resolved() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
