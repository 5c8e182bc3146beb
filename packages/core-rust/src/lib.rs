//! Trellis Core -- message-type codec, resolver handler contract, and function metadata.

pub mod handler;
pub mod message;
pub mod metadata;
pub mod mime;

pub use handler::ResolverHandler;
pub use message::{content_types, InvalidKindError, MessageKind};
pub use metadata::{BindingDirection, BindingInfo, FunctionMetadata};
pub use mime::MimeDescriptor;
