//! HTTP surface exposed to the serverless function host.
//!
//! The host drives the worker over plain HTTP: one invocation endpoint plus
//! liveness/readiness probes. All routes share an `AppState` carrying the
//! function registry and network configuration.

pub mod config;
pub mod handlers;
pub mod shutdown;

pub use config::NetworkConfig;
pub use handlers::AppState;
pub use shutdown::{ctrl_c, ShutdownSignal};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Builds the worker's axum router with tracing, timeout, and body-limit
/// middleware applied.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    Router::new()
        .route("/invoke/{function_id}", post(handlers::invoke_handler))
        .route("/health", get(handlers::health_handler))
        .route("/healthz", get(handlers::liveness_handler))
        .route("/readyz", get(handlers::readiness_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .with_state(state)
}
