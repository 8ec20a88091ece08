//! org-graph-store
//!
//! File-backed persistence for the org graph:
//!
//! - [`json`]: canonical JSON export and validated import (strict or lax)
//! - [`shards`]: per-type shard split/merge for the external sync tooling
//! - [`graphml`]: one-way GraphML export for visualisation
//! - [`state`]: the mtime-gated [`state::GraphState`] service with atomic
//!   persistence

pub mod graphml;
pub mod json;
pub mod shards;
pub mod state;

pub use json::{export_string, export_to_path, export_value, import_from_path, import_value, ImportOptions};
pub use state::GraphState;
