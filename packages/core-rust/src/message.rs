//! Message kinds and their canonical content types.
//!
//! Each of the ten defined kinds maps to exactly one canonical content-type
//! string and back (a bijection). Decoding is forgiving -- anything that is
//! not an exact `type/subtype` match is `Unknown` -- while encoding is
//! strict, because emitting a wrong content type corrupts the wire contract
//! with the host.

use crate::mime::MimeDescriptor;

/// Canonical content-type strings, one per non-`Unknown` [`MessageKind`].
pub mod content_types {
    pub const FIELD_RESOLVE_REQUEST: &str = "application/x-field-resolve-request";
    pub const FIELD_RESOLVE_RESPONSE: &str = "application/x-field-resolve-response";
    pub const INTERFACE_RESOLVE_TYPE_REQUEST: &str =
        "application/x-interface-resolve-type-request";
    pub const INTERFACE_RESOLVE_TYPE_RESPONSE: &str =
        "application/x-interface-resolve-type-response";
    pub const SCALAR_PARSE_REQUEST: &str = "application/x-scalar-parse-request";
    pub const SCALAR_PARSE_RESPONSE: &str = "application/x-scalar-parse-response";
    pub const SCALAR_SERIALIZE_REQUEST: &str = "application/x-scalar-serialize-request";
    pub const SCALAR_SERIALIZE_RESPONSE: &str = "application/x-scalar-serialize-response";
    pub const SET_SECRETS_REQUEST: &str = "application/x-set-secrets-request";
    pub const SET_SECRETS_RESPONSE: &str = "application/x-set-secrets-response";

    /// All ten canonical strings, for exhaustive round-trip checks.
    pub const ALL: [&str; 10] = [
        FIELD_RESOLVE_REQUEST,
        FIELD_RESOLVE_RESPONSE,
        INTERFACE_RESOLVE_TYPE_REQUEST,
        INTERFACE_RESOLVE_TYPE_RESPONSE,
        SCALAR_PARSE_REQUEST,
        SCALAR_PARSE_RESPONSE,
        SCALAR_SERIALIZE_REQUEST,
        SCALAR_SERIALIZE_RESPONSE,
        SET_SECRETS_REQUEST,
        SET_SECRETS_RESPONSE,
    ];
}

/// Error returned when a kind has no canonical content type to encode.
#[derive(Debug, thiserror::Error)]
#[error("no canonical content type for message kind {kind:?}")]
pub struct InvalidKindError {
    pub kind: MessageKind,
}

/// The message categories carried over the dispatch protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    FieldResolveRequest,
    FieldResolveResponse,
    InterfaceResolveTypeRequest,
    InterfaceResolveTypeResponse,
    ScalarParseRequest,
    ScalarParseResponse,
    ScalarSerializeRequest,
    ScalarSerializeResponse,
    SetSecretsRequest,
    SetSecretsResponse,
    Unknown,
}

impl MessageKind {
    /// Decodes a parsed descriptor into a message kind.
    ///
    /// Matching is exact on `type/subtype`; parameters are ignored.
    #[must_use]
    pub fn from_mime(descriptor: &MimeDescriptor) -> Self {
        if descriptor.ty != "application" {
            return Self::Unknown;
        }
        match descriptor.subtype.as_str() {
            "x-field-resolve-request" => Self::FieldResolveRequest,
            "x-field-resolve-response" => Self::FieldResolveResponse,
            "x-interface-resolve-type-request" => Self::InterfaceResolveTypeRequest,
            "x-interface-resolve-type-response" => Self::InterfaceResolveTypeResponse,
            "x-scalar-parse-request" => Self::ScalarParseRequest,
            "x-scalar-parse-response" => Self::ScalarParseResponse,
            "x-scalar-serialize-request" => Self::ScalarSerializeRequest,
            "x-scalar-serialize-response" => Self::ScalarSerializeResponse,
            "x-set-secrets-request" => Self::SetSecretsRequest,
            "x-set-secrets-response" => Self::SetSecretsResponse,
            _ => Self::Unknown,
        }
    }

    /// Convenience: parse a raw content-type header and decode it.
    #[must_use]
    pub fn from_content_type(raw: &str) -> Self {
        Self::from_mime(&MimeDescriptor::parse(raw))
    }

    /// Encodes this kind back into its canonical content-type string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKindError`] for `Unknown`, which has no canonical
    /// content type.
    pub fn canonical_mime(self) -> Result<&'static str, InvalidKindError> {
        match self {
            Self::FieldResolveRequest => Ok(content_types::FIELD_RESOLVE_REQUEST),
            Self::FieldResolveResponse => Ok(content_types::FIELD_RESOLVE_RESPONSE),
            Self::InterfaceResolveTypeRequest => {
                Ok(content_types::INTERFACE_RESOLVE_TYPE_REQUEST)
            }
            Self::InterfaceResolveTypeResponse => {
                Ok(content_types::INTERFACE_RESOLVE_TYPE_RESPONSE)
            }
            Self::ScalarParseRequest => Ok(content_types::SCALAR_PARSE_REQUEST),
            Self::ScalarParseResponse => Ok(content_types::SCALAR_PARSE_RESPONSE),
            Self::ScalarSerializeRequest => Ok(content_types::SCALAR_SERIALIZE_REQUEST),
            Self::ScalarSerializeResponse => Ok(content_types::SCALAR_SERIALIZE_RESPONSE),
            Self::SetSecretsRequest => Ok(content_types::SET_SECRETS_REQUEST),
            Self::SetSecretsResponse => Ok(content_types::SET_SECRETS_RESPONSE),
            Self::Unknown => Err(InvalidKindError { kind: self }),
        }
    }

    /// True for the five kinds that are valid dispatch inputs.
    #[must_use]
    pub fn is_request(self) -> bool {
        matches!(
            self,
            Self::FieldResolveRequest
                | Self::InterfaceResolveTypeRequest
                | Self::ScalarParseRequest
                | Self::ScalarSerializeRequest
                | Self::SetSecretsRequest
        )
    }

    /// The fixed 1:1 response kind for a request kind, `None` otherwise.
    #[must_use]
    pub fn response_kind(self) -> Option<Self> {
        match self {
            Self::FieldResolveRequest => Some(Self::FieldResolveResponse),
            Self::InterfaceResolveTypeRequest => Some(Self::InterfaceResolveTypeResponse),
            Self::ScalarParseRequest => Some(Self::ScalarParseResponse),
            Self::ScalarSerializeRequest => Some(Self::ScalarSerializeResponse),
            Self::SetSecretsRequest => Some(Self::SetSecretsResponse),
            _ => None,
        }
    }
}
