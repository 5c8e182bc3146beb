//! The resolver-handler contract: the seam between the dispatch worker and
//! the GraphQL resolver runtime it hosts.

use async_trait::async_trait;

/// The five resolver operations the handler library provides.
///
/// Each operation receives the raw request content type and payload bytes
/// and returns raw response bytes; the worker never interprets either side.
/// Implementations may suspend while resolving, but must not retain the
/// borrowed payload past the call.
///
/// Errors returned here are system faults, not user-facing protocol errors:
/// the worker propagates them to the host as failed invocations.
#[async_trait]
pub trait ResolverHandler: Send + Sync {
    async fn field_resolve(&self, content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>>;

    async fn interface_resolve_type(
        &self,
        content_type: &str,
        body: &[u8],
    ) -> anyhow::Result<Vec<u8>>;

    async fn scalar_parse(&self, content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>>;

    async fn scalar_serialize(&self, content_type: &str, body: &[u8])
        -> anyhow::Result<Vec<u8>>;

    async fn set_secrets(&self, content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>>;
}
