//! org-graph-mcp
//!
//! The ATP tool dispatcher: a line-delimited JSON tool protocol served
//! over stdio, backed by the shared [`org_graph_store::GraphState`].
//!
//! - [`protocol`]: wire types and the closed error-kind set
//! - [`tools`]: the tool registry with REST route mapping
//! - [`handlers`]: per-tool handlers with validate-before-commit writes
//! - [`compact`]: the response-shaping transform shared with REST
//! - [`server`]: the stdio run loop

pub mod compact;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use compact::{compact_entity, compact_relationship};
pub use handlers::Handlers;
pub use protocol::{AtpError, AtpRequest, AtpResponse};
