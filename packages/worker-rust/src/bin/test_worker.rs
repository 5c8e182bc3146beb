//! Standalone test worker: serves an echoing resolver over the host
//! protocol. Useful for exercising the invocation surface with curl or an
//! integration harness.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use trellis_core::{FunctionMetadata, ResolverHandler};
use trellis_worker::network::{self, AppState, NetworkConfig, ShutdownSignal};
use trellis_worker::service::FunctionRegistry;

#[derive(Debug, Parser)]
#[command(name = "test-worker", about = "Trellis test worker")]
struct Args {
    /// Address to bind on.
    #[arg(long, env = "TRELLIS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "TRELLIS_PORT", default_value_t = 8080)]
    port: u16,

    /// Log filter, e.g. `info` or `trellis_worker=debug`.
    #[arg(long, env = "TRELLIS_LOG", default_value = "info")]
    log: String,
}

/// Echoes every request body back unchanged, for protocol-level testing.
struct EchoResolver;

#[async_trait]
impl ResolverHandler for EchoResolver {
    async fn field_resolve(&self, _content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(body.to_vec())
    }

    async fn interface_resolve_type(
        &self,
        _content_type: &str,
        body: &[u8],
    ) -> anyhow::Result<Vec<u8>> {
        Ok(body.to_vec())
    }

    async fn scalar_parse(&self, _content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(body.to_vec())
    }

    async fn scalar_serialize(&self, _content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(body.to_vec())
    }

    async fn set_secrets(&self, _content_type: &str, body: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(body.to_vec())
    }
}

fn graphql_metadata() -> anyhow::Result<FunctionMetadata> {
    let metadata = serde_json::from_value(json!({
        "name": "graphql",
        "bindings": [
            {"name": "req", "type": "httpTrigger", "direction": "in"},
            {"name": "res", "type": "http", "direction": "out"},
        ],
    }))?;
    Ok(metadata)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log)?)
        .init();

    let config = Arc::new(NetworkConfig {
        host: args.host,
        port: args.port,
        ..NetworkConfig::default()
    });

    let registry = Arc::new(FunctionRegistry::new(Box::new(|| {
        Ok(Arc::new(EchoResolver) as Arc<dyn ResolverHandler>)
    })));
    registry.load("graphql", graphql_metadata()?)?;

    let state = AppState {
        registry,
        config: Arc::clone(&config),
        start_time: Instant::now(),
    };
    let app = network::build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "test worker listening");

    let shutdown = Arc::new(ShutdownSignal::new());
    let trigger = Arc::clone(&shutdown);
    tokio::spawn(async move {
        network::ctrl_c().await;
        trigger.trigger();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;
    Ok(())
}
