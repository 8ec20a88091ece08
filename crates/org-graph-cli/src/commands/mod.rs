//! CLI command implementations, one module per command family.

pub mod benchmark;
pub mod demo;
pub mod generate;
pub mod inspect;
pub mod transfer;

use std::path::PathBuf;
use std::sync::Arc;

use org_graph_core::Config;
use org_graph_mcp::{server, Handlers};
use org_graph_store::GraphState;

/// Run the ATP server on stdio, optionally preloading a graph file.
pub fn serve(graph: Option<PathBuf>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut config = Config::from_env();
        if let Some(path) = graph {
            config.default_graph_path = Some(path);
        }
        let state = Arc::new(GraphState::auto_load_default(&config));
        let handlers = Arc::new(Handlers::new(state));
        server::run_stdio(handlers).await
    })
}
