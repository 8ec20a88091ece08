//! Dispatcher scenarios over a real generated graph file: load, reads,
//! blast radius, write persistence, batch atomicity, and mtime-gated
//! auto-reload.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use org_graph_core::error::ErrorKind;
use org_graph_core::types::EntityType;
use org_graph_engine::{factory, GraphEngine, MemoryGraph};
use org_graph_mcp::{AtpRequest, AtpResponse, Handlers};
use org_graph_store::{export_to_path, GraphState, ImportOptions};
use org_graph_synth::{profiles, Orchestrator};

fn write_generated_graph(path: &Path, employees: u32, seed: u64) -> MemoryGraph {
    factory::discover();
    let mut engine = MemoryGraph::new();
    Orchestrator::new(profiles::tech_company("Acme", employees), seed)
        .generate(&mut engine)
        .expect("pipeline succeeds");
    export_to_path(&engine, path).unwrap();
    engine
}

fn call(handlers: &Handlers, tool: &str, arguments: Value) -> AtpResponse {
    handlers.dispatch(AtpRequest {
        tool: tool.to_string(),
        arguments,
    })
}

#[test]
fn load_then_read_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let engine = write_generated_graph(&path, 100, 42);

    let state = Arc::new(GraphState::new(ImportOptions::default()));
    let handlers = Handlers::new(state);

    let loaded = call(&handlers, "load_graph", json!({"path": path}))
        .result
        .expect("load succeeds");
    assert_eq!(
        loaded["entity_count"].as_u64().unwrap() as usize,
        engine.entity_count(None)
    );

    let stats = call(&handlers, "get_statistics", json!({}))
        .result
        .expect("statistics");
    assert_eq!(stats["entity_type_counts"]["person"], 100);

    let listed = call(&handlers, "list_entities", json!({"type": "system", "limit": 5}))
        .result
        .expect("list");
    assert_eq!(listed.as_array().unwrap().len(), 5);

    let search = call(&handlers, "search_entities", json!({"query": "email server"}))
        .result
        .expect("search");
    assert!(!search.as_array().unwrap().is_empty());

    let centrality = call(
        &handlers,
        "compute_centrality",
        json!({"metric": "pagerank", "top_n": 5}),
    )
    .result
    .expect("pagerank");
    assert_eq!(centrality.as_array().unwrap().len(), 5);
}

#[test]
fn blast_radius_matches_the_engine_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let engine = write_generated_graph(&path, 100, 3);
    let system = engine
        .list_entities(Some(EntityType::System), Some(1))
        .pop()
        .unwrap();

    let state = Arc::new(GraphState::new(ImportOptions::default()));
    let handlers = Handlers::new(state);
    call(&handlers, "load_graph", json!({"path": path}))
        .result
        .expect("load");

    let radius = call(
        &handlers,
        "get_blast_radius",
        json!({"id": system.id, "max_depth": 2}),
    )
    .result
    .expect("blast radius");

    let engine_view = engine.blast_radius(&system.id, 2);
    let engine_total: usize = engine_view
        .iter()
        .filter(|(depth, _)| **depth > 0)
        .map(|(_, entities)| entities.len())
        .sum();
    assert_eq!(radius["total_affected"].as_u64().unwrap() as usize, engine_total);
    // Depth 0 (the source) never appears in the response map.
    assert!(radius["by_depth"].get("0").is_none());
}

#[test]
fn writes_persist_and_batch_failures_do_not() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let engine = write_generated_graph(&path, 100, 9);
    let policy = engine
        .list_entities(Some(EntityType::Policy), Some(1))
        .pop()
        .unwrap();
    let system = engine
        .list_entities(Some(EntityType::System), Some(1))
        .pop()
        .unwrap();
    let person = engine
        .list_entities(Some(EntityType::Person), Some(1))
        .pop()
        .unwrap();

    let state = Arc::new(GraphState::new(ImportOptions::default()));
    let handlers = Handlers::new(state);
    call(&handlers, "load_graph", json!({"path": path}))
        .result
        .expect("load");

    let before = call(&handlers, "get_statistics", json!({}))
        .result
        .unwrap();

    // A failing batch leaves both memory and disk untouched.
    let rejected = call(
        &handlers,
        "add_relationships_batch",
        json!({"relationships": [
            {"relationship_type": "governs", "source_id": policy.id, "target_id": system.id},
            {"relationship_type": "governs", "source_id": person.id, "target_id": system.id},
        ]}),
    );
    assert_eq!(rejected.error.unwrap().kind, ErrorKind::BatchRejected);
    let after_reject = call(&handlers, "get_statistics", json!({}))
        .result
        .unwrap();
    assert_eq!(before, after_reject);

    // A valid write commits and persists; the file on disk reflects it.
    let rel_count_before = before["total_relationships"].as_u64().unwrap();
    call(
        &handlers,
        "add_relationship_tool",
        json!({
            "relationship_type": "governs",
            "source_id": policy.id,
            "target_id": system.id,
            "weight": 0.7,
        }),
    )
    .result
    .expect("write succeeds");

    let options = ImportOptions::default();
    let on_disk = org_graph_store::import_from_path(&path, &options).unwrap();
    assert_eq!(
        on_disk.relationship_count(None) as u64,
        rel_count_before + 1
    );
}

#[test]
fn external_rewrite_is_visible_to_the_next_tool_call() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    write_generated_graph(&path, 100, 5);

    let state = Arc::new(GraphState::new(ImportOptions::default()));
    let handlers = Handlers::new(state);
    call(&handlers, "load_graph", json!({"path": path}))
        .result
        .expect("load");
    let first = call(&handlers, "get_statistics", json!({}))
        .result
        .unwrap();

    // Replace the file with a different valid graph and push its mtime
    // forward past filesystem granularity.
    write_generated_graph(&path, 150, 6);
    let file = std::fs::File::options().append(true).open(&path).unwrap();
    file.set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(2))
        .unwrap();
    drop(file);

    let second = call(&handlers, "get_statistics", json!({}))
        .result
        .unwrap();
    assert_ne!(
        first["total_entities"], second["total_entities"],
        "reload did not pick up the external change"
    );
    assert_eq!(second["entity_type_counts"]["person"], 150);
}
