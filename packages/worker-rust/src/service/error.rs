//! The dispatch error taxonomy.
//!
//! The host distinguishes "user code returned a handled error" from "worker
//! crashed", so the taxonomy keeps the two apart: protocol errors are
//! recovered at the adapter boundary into 400 responses, everything else
//! surfaces as a failed invocation.

/// Errors produced by the dispatch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The content type did not decode to one of the five request kinds.
    /// Protocol class: recovered to a 400 response.
    #[error("invalid message type")]
    InvalidMessageType,

    /// The host request body was absent or not binary.
    /// Protocol class: recovered to a 400 response.
    #[error("body for '{function_id}' is not a valid binary payload")]
    InvalidBody { function_id: String },

    /// A function id was queried before being loaded. Host contract
    /// violation: propagated, never recovered.
    #[error("function '{function_id}' is not loaded and cannot be invoked")]
    NotLoaded { function_id: String },

    /// The resolver entry point could not be resolved. Fatal at load time,
    /// never retried within the process.
    #[error("resolver entry point could not be resolved")]
    Configuration(#[source] anyhow::Error),

    /// A resolver operation failed. System fault: propagated past the
    /// adapter so the host marks the invocation failed.
    #[error("resolver operation failed")]
    Handler(#[source] anyhow::Error),
}

impl DispatchError {
    /// True for the user-facing protocol class that the adapter converts
    /// into a 400 response.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::InvalidMessageType | Self::InvalidBody { .. })
    }
}
