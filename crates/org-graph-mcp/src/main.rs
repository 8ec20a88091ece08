//! ATP server binary: loads the default graph (if configured) and serves
//! the tool protocol on stdio.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use org_graph_core::Config;
use org_graph_mcp::{server, Handlers};
use org_graph_store::GraphState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; all logging goes to stderr.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    org_graph_engine::factory::discover();
    let config = Config::from_env();
    let state = Arc::new(GraphState::auto_load_default(&config));
    let handlers = Arc::new(Handlers::new(state));
    server::run_stdio(handlers).await
}
