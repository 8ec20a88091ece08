//! Round-trip properties over a full generated graph: canonical JSON and
//! per-type shards both reproduce the same entity and relationship sets.

use std::collections::BTreeMap;

use org_graph_core::types::{Direction, Entity, Relationship};
use org_graph_engine::{factory, GraphEngine, MemoryGraph};
use org_graph_store::{export_value, import_value, shards, ImportOptions};
use org_graph_synth::{profiles, Orchestrator};

fn generated_engine() -> MemoryGraph {
    factory::discover();
    let mut engine = MemoryGraph::new();
    Orchestrator::new(profiles::financial_org("Meridian Capital", 200), 21)
        .generate(&mut engine)
        .expect("pipeline succeeds");
    engine
}

fn entity_map(engine: &dyn GraphEngine) -> BTreeMap<String, Entity> {
    engine
        .list_entities(None, None)
        .into_iter()
        .map(|e| (e.id.clone(), e))
        .collect()
}

fn relationship_map(engine: &dyn GraphEngine) -> BTreeMap<String, Relationship> {
    engine
        .list_entities(None, None)
        .iter()
        .flat_map(|e| engine.relationships(&e.id, Direction::Out, None))
        .map(|r| (r.id.clone(), r))
        .collect()
}

#[test]
fn canonical_json_round_trip_is_lossless() {
    let engine = generated_engine();
    let value = export_value(&engine).unwrap();
    let rebuilt = import_value(&value, &ImportOptions::default()).unwrap();

    // Same sets by id, with every field preserved: ids, timestamps,
    // mirror fields, property maps.
    assert_eq!(entity_map(&engine), entity_map(rebuilt.as_ref()));
    assert_eq!(relationship_map(&engine), relationship_map(rebuilt.as_ref()));

    let stats = engine.statistics();
    let rebuilt_stats = rebuilt.statistics();
    assert_eq!(stats.total_entities, rebuilt_stats.total_entities);
    assert_eq!(stats.total_relationships, rebuilt_stats.total_relationships);
}

#[test]
fn strict_import_accepts_our_own_canonical_output() {
    let engine = generated_engine();
    let value = export_value(&engine).unwrap();
    let options = ImportOptions {
        strict: true,
        backend: "memory".to_string(),
    };
    let rebuilt = import_value(&value, &options).unwrap();
    assert_eq!(rebuilt.entity_count(None), engine.entity_count(None));
}

#[test]
fn shard_split_then_merge_reproduces_the_canonical_graph() {
    let engine = generated_engine();
    let dir = tempfile::tempdir().unwrap();
    shards::split(&engine, dir.path()).unwrap();

    let rebuilt = shards::build(dir.path(), &ImportOptions::default()).unwrap();
    assert_eq!(entity_map(&engine), entity_map(rebuilt.as_ref()));
    assert_eq!(relationship_map(&engine), relationship_map(rebuilt.as_ref()));

    // One file per observed type, none for absent types.
    let entity_shards = std::fs::read_dir(dir.path().join("entities")).unwrap().count();
    assert_eq!(entity_shards, engine.statistics().entity_type_counts.len());
}

#[test]
fn graphml_export_covers_every_node_and_edge() {
    let engine = generated_engine();
    let xml = org_graph_store::graphml::export_graphml(&engine).unwrap();
    assert_eq!(xml.matches("<node ").count(), engine.entity_count(None));
    assert_eq!(
        xml.matches("<edge ").count(),
        engine.relationship_count(None)
    );
}
