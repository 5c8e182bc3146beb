//! Host-facing invocation envelope types.
//!
//! The host hands the worker an HTTP-shaped request whose body arrives as
//! typed data: raw bytes, a string, or a JSON value. The dispatch protocol
//! only accepts the binary form; everything else is a protocol error at the
//! adapter boundary.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

/// The typed body of a host invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostBody {
    Binary(Bytes),
    Text(String),
    Json(serde_json::Value),
    Empty,
}

impl HostBody {
    /// The raw payload bytes, if this body is the binary form.
    #[must_use]
    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// An invocation request as delivered by the host.
#[derive(Debug, Clone)]
pub struct HostRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: HostBody,
}

impl HostRequest {
    /// The content-type header value, if present and valid UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// The response the worker writes back into the host envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct HostResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

impl HostResponse {
    /// A successful dispatch result tagged with its response content type.
    #[must_use]
    pub fn ok(content_type: String, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: Bytes::from(body),
        }
    }

    /// A recovered protocol error: plain-text 400 with the error message.
    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            content_type: "text/plain".to_string(),
            body: Bytes::copy_from_slice(message.as_bytes()),
        }
    }
}
