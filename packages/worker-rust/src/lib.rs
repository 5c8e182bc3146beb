//! Trellis Worker -- runs a GraphQL resolver runtime inside a serverless
//! function host.
//!
//! The worker exposes a small HTTP surface to the host (`network`), routes
//! invocation payloads by message type (`service`), and converts between the
//! host's request envelope and raw protocol bytes (`host`).

pub mod host;
pub mod network;
pub mod service;

pub use host::{HostBody, HostRequest, HostResponse};
pub use network::{build_router, AppState, NetworkConfig};
pub use service::{DispatchError, Dispatcher, FunctionInvoker, FunctionRegistry, HandlerFactory};
