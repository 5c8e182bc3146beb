//! HTTP handler definitions for the worker's host-facing surface.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod health;
pub mod invoke;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use invoke::invoke_handler;

use std::sync::Arc;
use std::time::Instant;

use crate::network::NetworkConfig;
use crate::service::FunctionRegistry;

/// Shared application state passed to all axum handlers via `State`
/// extraction. Holds `Arc` references so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Function metadata and the process-wide dispatch entry point.
    pub registry: Arc<FunctionRegistry>,
    /// Network configuration (bind address, timeouts, body limit).
    pub config: Arc<NetworkConfig>,
    /// Worker process start time, used for uptime calculation.
    pub start_time: Instant,
}
