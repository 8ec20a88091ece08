//! Process-wide factory mapping backend names to engine constructors.
//!
//! `discover()` runs once during process initialisation to register the
//! built-in backends; consumers then receive a `Box<dyn GraphEngine>` by
//! name and never see a concrete type.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::debug;

use org_graph_core::error::{CoreError, CoreResult};

use crate::engine::GraphEngine;
use crate::memory::MemoryGraph;

type BackendCtor = fn() -> Box<dyn GraphEngine>;

fn registry() -> &'static RwLock<HashMap<String, BackendCtor>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, BackendCtor>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register a backend constructor under a name. Re-registering a name
/// replaces the previous constructor.
pub fn register(name: &str, ctor: BackendCtor) {
    registry().write().insert(name.to_string(), ctor);
    debug!(backend = name, "registered engine backend");
}

/// Register all built-in backends. Idempotent; called once at startup.
pub fn discover() {
    register("memory", || Box::new(MemoryGraph::new()));
}

/// Instantiate a backend by name.
pub fn create(name: &str) -> CoreResult<Box<dyn GraphEngine>> {
    let guard = registry().read();
    match guard.get(name) {
        Some(ctor) => Ok(ctor()),
        None => {
            let mut available: Vec<String> = guard.keys().cloned().collect();
            available.sort();
            Err(CoreError::Validation {
                field: "backend".into(),
                message: format!("Unknown backend '{name}'. Available: {available:?}"),
            })
        }
    }
}

/// Names of all registered backends, sorted.
pub fn available_backends() -> Vec<String> {
    let mut names: Vec<String> = registry().read().keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_registers_memory_backend() {
        discover();
        assert!(available_backends().contains(&"memory".to_string()));
        let engine = create("memory").unwrap();
        assert_eq!(engine.entity_count(None), 0);
    }

    #[test]
    fn unknown_backend_is_an_error() {
        discover();
        let err = create("neo4j").unwrap_err();
        assert!(err.to_string().contains("Unknown backend"));
    }

    #[test]
    fn discover_is_idempotent() {
        discover();
        discover();
        let count = available_backends()
            .iter()
            .filter(|n| n.as_str() == "memory")
            .count();
        assert_eq!(count, 1);
    }
}
