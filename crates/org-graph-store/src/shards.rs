//! Per-type shard layout used by the external sync tooling.
//!
//! ```text
//! <root>/entities/<entity_type>.json          # JSON array of entities
//! <root>/relationships/<relationship_type>.json
//! ```
//!
//! Arrays are sorted by id for deterministic diffs; absent types produce no
//! file. `merge` reads every shard back into one canonical JSON object.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{json, Value};
use tracing::debug;

use org_graph_core::error::{CoreError, CoreResult};
use org_graph_core::types::Direction;
use org_graph_engine::GraphEngine;

use crate::json::{import_value, ImportOptions};

/// Write one shard file per observed entity and relationship type.
pub fn split(engine: &dyn GraphEngine, root: &Path) -> CoreResult<()> {
    let entities_dir = root.join("entities");
    let relationships_dir = root.join("relationships");
    std::fs::create_dir_all(&entities_dir)?;
    std::fs::create_dir_all(&relationships_dir)?;

    let mut entities_by_type: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    let mut relationships_by_type: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for entity in engine.list_entities(None, None) {
        for rel in engine.relationships(&entity.id, Direction::Out, None) {
            relationships_by_type
                .entry(rel.relationship_type.as_str().to_string())
                .or_default()
                .push(serde_json::to_value(&rel)?);
        }
        entities_by_type
            .entry(entity.entity_type().as_str().to_string())
            .or_default()
            .push(serde_json::to_value(&entity)?);
    }

    for (dir, shards) in [
        (&entities_dir, entities_by_type),
        (&relationships_dir, relationships_by_type),
    ] {
        for (type_name, mut items) in shards {
            items.sort_by(|a, b| {
                let a_id = a.get("id").and_then(Value::as_str).unwrap_or_default();
                let b_id = b.get("id").and_then(Value::as_str).unwrap_or_default();
                a_id.cmp(b_id)
            });
            let path = dir.join(format!("{type_name}.json"));
            std::fs::write(&path, serde_json::to_string_pretty(&Value::Array(items))?)?;
            debug!(?path, "shard written");
        }
    }
    Ok(())
}

fn read_shard_dir(dir: &Path) -> CoreResult<Vec<Value>> {
    let mut items = Vec::new();
    if !dir.exists() {
        return Ok(items);
    }
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    for path in paths {
        let text = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            CoreError::Persistence(format!("Invalid shard {}: {e}", path.display()))
        })?;
        match value {
            Value::Array(entries) => items.extend(entries),
            _ => {
                return Err(CoreError::Persistence(format!(
                    "Shard {} is not a JSON array",
                    path.display()
                )))
            }
        }
    }
    Ok(items)
}

/// Concatenate all shard arrays back into one canonical JSON value.
pub fn merge_value(root: &Path) -> CoreResult<Value> {
    let entities = read_shard_dir(&root.join("entities"))?;
    let relationships = read_shard_dir(&root.join("relationships"))?;
    Ok(json!({
        "entities": entities,
        "relationships": relationships,
    }))
}

/// Rebuild a full engine from a shard tree, running import validation.
pub fn build(root: &Path, options: &ImportOptions) -> CoreResult<Box<dyn GraphEngine>> {
    import_value(&merge_value(root)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::types::kinds::{Department, Person};
    use org_graph_core::types::{Entity, EntityKind, Relationship, RelationshipType};
    use org_graph_engine::{factory, MemoryGraph};

    #[test]
    fn split_then_build_reproduces_the_graph() {
        factory::discover();
        let mut engine = MemoryGraph::new();
        let p = Entity::new("Jonas Novak", EntityKind::Person(Person::default()));
        let d = Entity::new("Legal", EntityKind::Department(Department::default()));
        let (pid, did) = (p.id.clone(), d.id.clone());
        engine.add_entities_bulk(vec![p, d]).unwrap();
        engine
            .add_relationship(Relationship::new(RelationshipType::WorksIn, &pid, &did))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        split(&engine, dir.path()).unwrap();
        assert!(dir.path().join("entities/person.json").exists());
        assert!(dir.path().join("entities/department.json").exists());
        assert!(dir.path().join("relationships/works_in.json").exists());
        // Absent types produce no file.
        assert!(!dir.path().join("entities/system.json").exists());

        let rebuilt = build(dir.path(), &ImportOptions::default()).unwrap();
        assert_eq!(rebuilt.entity_count(None), 2);
        assert_eq!(rebuilt.relationship_count(None), 1);
        assert_eq!(rebuilt.get_entity(&pid).unwrap().name, "Jonas Novak");
    }

    #[test]
    fn shard_arrays_are_sorted_by_id() {
        factory::discover();
        let mut engine = MemoryGraph::new();
        for name in ["c", "a", "b"] {
            let mut e = Entity::new(name, EntityKind::Person(Person::default()));
            e.id = format!("person-{name}");
            engine.add_entity(e).unwrap();
        }
        let dir = tempfile::tempdir().unwrap();
        split(&engine, dir.path()).unwrap();
        let text = std::fs::read_to_string(dir.path().join("entities/person.json")).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let ids: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["person-a", "person-b", "person-c"]);
    }

    #[test]
    fn empty_root_merges_to_empty_graph() {
        factory::discover();
        let dir = tempfile::tempdir().unwrap();
        let engine = build(dir.path(), &ImportOptions::default()).unwrap();
        assert_eq!(engine.entity_count(None), 0);
    }
}
