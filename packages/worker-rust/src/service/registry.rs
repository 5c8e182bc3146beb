//! Function registry: per-function metadata and the process-wide dispatch
//! entry point.
//!
//! Metadata is written once per function id and never mutated. The entry
//! point follows an explicit `Unresolved -> Resolved | Failed` state machine
//! guarded by a lock, so concurrent first loads resolve it exactly once and
//! a failed resolution is terminal for the process.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use trellis_core::{FunctionMetadata, ResolverHandler};

use super::error::DispatchError;
use super::router::Dispatcher;
use crate::host::{HostRequest, HostResponse};

// ---------------------------------------------------------------------------
// Entry point state
// ---------------------------------------------------------------------------

/// Factory producing the resolver handler the dispatch entry point wraps.
///
/// An explicit function-reference type: if a caller can construct one, it is
/// invocable by definition. Resolution errors are configuration faults.
pub type HandlerFactory =
    Box<dyn Fn() -> anyhow::Result<Arc<dyn ResolverHandler>> + Send + Sync>;

/// Lifecycle of the process-wide dispatch entry point.
///
/// `Failed` is terminal: a resolution error is a configuration fault, not a
/// per-request condition, and is never retried within the process.
enum EntryPointState {
    Unresolved,
    Resolved(Arc<Dispatcher>),
    Failed,
}

// ---------------------------------------------------------------------------
// FunctionRegistry
// ---------------------------------------------------------------------------

/// Stores function metadata by id and owns the dispatch entry point shared
/// by every registered function.
pub struct FunctionRegistry {
    info: DashMap<String, Arc<FunctionMetadata>>,
    entry_point: RwLock<EntryPointState>,
    factory: HandlerFactory,
}

impl FunctionRegistry {
    #[must_use]
    pub fn new(factory: HandlerFactory) -> Self {
        Self {
            info: DashMap::new(),
            entry_point: RwLock::new(EntryPointState::Unresolved),
            factory,
        }
    }

    /// Registers a function id with its metadata.
    ///
    /// The first successful call also resolves the dispatch entry point; the
    /// write lock makes that resolution happen exactly once even when loads
    /// race.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Configuration` if the handler factory fails,
    /// or on every call after a failed resolution (the `Failed` state is
    /// terminal).
    pub fn load(
        &self,
        function_id: &str,
        metadata: FunctionMetadata,
    ) -> Result<(), DispatchError> {
        // First write wins: metadata is immutable for the process lifetime.
        self.info
            .entry(function_id.to_string())
            .or_insert_with(|| Arc::new(metadata));

        let mut entry_point = self.entry_point.write();
        match &*entry_point {
            EntryPointState::Resolved(_) => Ok(()),
            EntryPointState::Failed => Err(DispatchError::Configuration(anyhow::anyhow!(
                "entry point resolution already failed"
            ))),
            EntryPointState::Unresolved => match (self.factory)() {
                Ok(handler) => {
                    tracing::info!(function_id, "dispatch entry point resolved");
                    *entry_point = EntryPointState::Resolved(Arc::new(Dispatcher::new(handler)));
                    Ok(())
                }
                Err(error) => {
                    tracing::error!(function_id, %error, "dispatch entry point resolution failed");
                    *entry_point = EntryPointState::Failed;
                    Err(DispatchError::Configuration(error))
                }
            },
        }
    }

    /// Metadata for a loaded function id.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::NotLoaded` if the id was never loaded.
    pub fn get_info(&self, function_id: &str) -> Result<Arc<FunctionMetadata>, DispatchError> {
        self.info
            .get(function_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DispatchError::NotLoaded {
                function_id: function_id.to_string(),
            })
    }

    /// An invoker bound to a loaded function id and the resolved entry point.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::NotLoaded` if the id was never loaded or the
    /// entry point is not resolved.
    pub fn invoker(&self, function_id: &str) -> Result<FunctionInvoker, DispatchError> {
        if !self.info.contains_key(function_id) {
            return Err(DispatchError::NotLoaded {
                function_id: function_id.to_string(),
            });
        }
        match &*self.entry_point.read() {
            EntryPointState::Resolved(dispatcher) => Ok(FunctionInvoker {
                function_id: function_id.to_string(),
                dispatcher: Arc::clone(dispatcher),
            }),
            _ => Err(DispatchError::NotLoaded {
                function_id: function_id.to_string(),
            }),
        }
    }

    /// True once the entry point reached `Resolved`. Drives the readiness
    /// probe.
    #[must_use]
    pub fn entry_point_resolved(&self) -> bool {
        matches!(&*self.entry_point.read(), EntryPointState::Resolved(_))
    }

    /// Number of loaded function ids.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.info.len()
    }
}

// ---------------------------------------------------------------------------
// FunctionInvoker
// ---------------------------------------------------------------------------

/// Bridges one host invocation to the dispatch entry point.
///
/// Protocol errors (missing/non-binary body, unroutable content type) are
/// recovered here into plain-text 400 responses. Anything else propagates as
/// `Err` so the host marks the invocation failed.
pub struct FunctionInvoker {
    function_id: String,
    dispatcher: Arc<Dispatcher>,
}

impl fmt::Debug for FunctionInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInvoker")
            .field("function_id", &self.function_id)
            .finish_non_exhaustive()
    }
}

impl FunctionInvoker {
    #[must_use]
    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    /// Runs one invocation against the host request.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Handler` when the resolver operation fails;
    /// protocol errors never reach the caller as `Err`.
    pub async fn invoke(&self, request: &HostRequest) -> Result<HostResponse, DispatchError> {
        match self.run(request).await {
            Ok(response) => Ok(response),
            Err(error) if error.is_protocol() => {
                tracing::info!(
                    function_id = %self.function_id,
                    %error,
                    "invocation rejected with protocol error"
                );
                Ok(HostResponse::bad_request(&error.to_string()))
            }
            Err(error) => Err(error),
        }
    }

    async fn run(&self, request: &HostRequest) -> Result<HostResponse, DispatchError> {
        let Some(body) = request.body.as_binary() else {
            return Err(DispatchError::InvalidBody {
                function_id: self.function_id.clone(),
            });
        };
        // A missing header parses to the unknown descriptor and is rejected
        // by the dispatcher as an invalid message type.
        let content_type = request.content_type().unwrap_or_default();
        let (response_content_type, data) =
            self.dispatcher.dispatch(content_type, body).await?;
        Ok(HostResponse::ok(response_content_type, data))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
