//! Operation routing: content-type-driven dispatch to resolver operations.

use std::sync::Arc;

use trellis_core::{MessageKind, MimeDescriptor, ResolverHandler};

use super::error::DispatchError;

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes a `(content_type, body)` pair to the matching resolver operation
/// and tags the result with the response kind's canonical content type.
///
/// This is the process-wide dispatch entry point: one logical step per call,
/// no internal concurrency. The content type is the sole dispatch signal --
/// the payload is never inspected before routing.
pub struct Dispatcher {
    handler: Arc<dyn ResolverHandler>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(handler: Arc<dyn ResolverHandler>) -> Self {
        Self { handler }
    }

    /// Dispatches one request and returns `(response_content_type, bytes)`.
    ///
    /// # Errors
    ///
    /// - `DispatchError::InvalidMessageType` when the content type decodes
    ///   to `Unknown` or to a response kind (responses are never valid
    ///   inputs).
    /// - `DispatchError::Handler` when the resolver operation fails.
    pub async fn dispatch(
        &self,
        content_type: &str,
        body: &[u8],
    ) -> Result<(String, Vec<u8>), DispatchError> {
        let kind = MessageKind::from_mime(&MimeDescriptor::parse(content_type));
        let (data, response_kind) = match kind {
            MessageKind::FieldResolveRequest => (
                self.handler
                    .field_resolve(content_type, body)
                    .await
                    .map_err(DispatchError::Handler)?,
                MessageKind::FieldResolveResponse,
            ),
            MessageKind::InterfaceResolveTypeRequest => (
                self.handler
                    .interface_resolve_type(content_type, body)
                    .await
                    .map_err(DispatchError::Handler)?,
                MessageKind::InterfaceResolveTypeResponse,
            ),
            MessageKind::ScalarParseRequest => (
                self.handler
                    .scalar_parse(content_type, body)
                    .await
                    .map_err(DispatchError::Handler)?,
                MessageKind::ScalarParseResponse,
            ),
            MessageKind::ScalarSerializeRequest => (
                self.handler
                    .scalar_serialize(content_type, body)
                    .await
                    .map_err(DispatchError::Handler)?,
                MessageKind::ScalarSerializeResponse,
            ),
            MessageKind::SetSecretsRequest => (
                self.handler
                    .set_secrets(content_type, body)
                    .await
                    .map_err(DispatchError::Handler)?,
                MessageKind::SetSecretsResponse,
            ),
            other => {
                tracing::debug!(content_type, kind = ?other, "unroutable message kind");
                return Err(DispatchError::InvalidMessageType);
            }
        };
        // Response kinds always have a canonical content type; an encoding
        // failure here would corrupt the wire contract, so treat it as fatal.
        let response_content_type = response_kind
            .canonical_mime()
            .map_err(|e| DispatchError::Configuration(e.into()))?;
        Ok((response_content_type.to_string(), data))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use trellis_core::content_types;

    use super::*;

    /// Test handler that records which operation ran and echoes a marker.
    struct RecordingHandler;

    #[async_trait]
    impl ResolverHandler for RecordingHandler {
        async fn field_resolve(&self, _ct: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok([b"field:".as_slice(), body].concat())
        }
        async fn interface_resolve_type(
            &self,
            _ct: &str,
            body: &[u8],
        ) -> anyhow::Result<Vec<u8>> {
            Ok([b"interface:".as_slice(), body].concat())
        }
        async fn scalar_parse(&self, _ct: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok([b"parse:".as_slice(), body].concat())
        }
        async fn scalar_serialize(&self, _ct: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok([b"serialize:".as_slice(), body].concat())
        }
        async fn set_secrets(&self, _ct: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok([b"secrets:".as_slice(), body].concat())
        }
    }

    /// Test handler whose operations always fail.
    struct FailingHandler;

    #[async_trait]
    impl ResolverHandler for FailingHandler {
        async fn field_resolve(&self, _ct: &str, _body: &[u8]) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("resolver blew up")
        }
        async fn interface_resolve_type(
            &self,
            _ct: &str,
            _body: &[u8],
        ) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("resolver blew up")
        }
        async fn scalar_parse(&self, _ct: &str, _body: &[u8]) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("resolver blew up")
        }
        async fn scalar_serialize(&self, _ct: &str, _body: &[u8]) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("resolver blew up")
        }
        async fn set_secrets(&self, _ct: &str, _body: &[u8]) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("resolver blew up")
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(RecordingHandler))
    }

    #[tokio::test]
    async fn field_resolve_request_routes_and_tags_response() {
        let (content_type, body) = dispatcher()
            .dispatch(content_types::FIELD_RESOLVE_REQUEST, b"payload")
            .await
            .unwrap();
        assert_eq!(content_type, content_types::FIELD_RESOLVE_RESPONSE);
        assert_eq!(body, b"field:payload");
    }

    #[tokio::test]
    async fn each_request_kind_routes_to_its_operation() {
        let cases: [(&str, &str, &[u8]); 5] = [
            (
                content_types::FIELD_RESOLVE_REQUEST,
                content_types::FIELD_RESOLVE_RESPONSE,
                b"field:x",
            ),
            (
                content_types::INTERFACE_RESOLVE_TYPE_REQUEST,
                content_types::INTERFACE_RESOLVE_TYPE_RESPONSE,
                b"interface:x",
            ),
            (
                content_types::SCALAR_PARSE_REQUEST,
                content_types::SCALAR_PARSE_RESPONSE,
                b"parse:x",
            ),
            (
                content_types::SCALAR_SERIALIZE_REQUEST,
                content_types::SCALAR_SERIALIZE_RESPONSE,
                b"serialize:x",
            ),
            (
                content_types::SET_SECRETS_REQUEST,
                content_types::SET_SECRETS_RESPONSE,
                b"secrets:x",
            ),
        ];
        let dispatcher = dispatcher();
        for (request_type, response_type, expected) in cases {
            let (content_type, body) = dispatcher.dispatch(request_type, b"x").await.unwrap();
            assert_eq!(content_type, response_type);
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn unknown_content_type_is_a_protocol_error() {
        for raw in ["application/json", "garbage", ""] {
            let err = dispatcher().dispatch(raw, b"x").await.unwrap_err();
            assert!(
                matches!(err, DispatchError::InvalidMessageType),
                "expected InvalidMessageType for {raw:?}"
            );
            assert_eq!(err.to_string(), "invalid message type");
        }
    }

    #[tokio::test]
    async fn response_kinds_are_never_valid_inputs() {
        for raw in [
            content_types::FIELD_RESOLVE_RESPONSE,
            content_types::INTERFACE_RESOLVE_TYPE_RESPONSE,
            content_types::SCALAR_PARSE_RESPONSE,
            content_types::SCALAR_SERIALIZE_RESPONSE,
            content_types::SET_SECRETS_RESPONSE,
        ] {
            let err = dispatcher().dispatch(raw, b"x").await.unwrap_err();
            assert!(matches!(err, DispatchError::InvalidMessageType));
        }
    }

    #[tokio::test]
    async fn content_type_parameters_do_not_affect_routing() {
        let (content_type, _) = dispatcher()
            .dispatch("application/x-scalar-parse-request; charset=utf-8", b"1")
            .await
            .unwrap();
        assert_eq!(content_type, content_types::SCALAR_PARSE_RESPONSE);
    }

    #[tokio::test]
    async fn handler_failures_surface_as_handler_errors() {
        let dispatcher = Dispatcher::new(Arc::new(FailingHandler));
        let err = dispatcher
            .dispatch(content_types::FIELD_RESOLVE_REQUEST, b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
        assert!(!err.is_protocol());
    }
}
