//! The dispatch pipeline:
//!
//! 1. **Codec** (`trellis-core`): content type -> `MessageKind`
//! 2. **Routing** (`router`): request kind -> resolver operation -> tagged response
//! 3. **Registry** (`registry`): per-function metadata + the process-wide entry point
//! 4. **Errors** (`error`): protocol vs. fault taxonomy

pub mod error;
pub mod registry;
pub mod router;

pub use error::DispatchError;
pub use registry::{FunctionInvoker, FunctionRegistry, HandlerFactory};
pub use router::Dispatcher;
