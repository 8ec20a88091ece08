//! Canonical JSON export and validated import.
//!
//! The canonical shape is `{"entities": [...], "relationships": [...],
//! "statistics": {...}}`. Export then re-import reproduces the same entity
//! and relationship sets with ids, timestamps, mirror fields, and property
//! maps preserved. Import runs the same referential-integrity and
//! domain/range checks as the write tools before committing anything.

use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::debug;

use org_graph_core::config::Config;
use org_graph_core::error::{CoreError, CoreResult};
use org_graph_core::types::{catalog, Direction, Entity, EntityType, Relationship};
use org_graph_engine::{factory, GraphEngine};

/// Import behaviour derived from the ambient configuration.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Reject unknown entity fields instead of routing them to `extra`.
    pub strict: bool,
    /// Backend name for the freshly built engine.
    pub backend: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            strict: false,
            backend: "memory".to_string(),
        }
    }
}

impl From<&Config> for ImportOptions {
    fn from(config: &Config) -> Self {
        ImportOptions {
            strict: config.strict_import,
            backend: config.backend.clone(),
        }
    }
}

/// Serialise the whole graph to the canonical JSON value.
pub fn export_value(engine: &dyn GraphEngine) -> CoreResult<Value> {
    let entities = engine.list_entities(None, None);
    let mut entity_values = Vec::with_capacity(entities.len());
    let mut relationship_values = Vec::new();
    for entity in &entities {
        entity_values.push(serde_json::to_value(entity)?);
        // Out-edges only: every relationship is emitted exactly once.
        for rel in engine.relationships(&entity.id, Direction::Out, None) {
            relationship_values.push(serde_json::to_value(&rel)?);
        }
    }
    Ok(json!({
        "entities": entity_values,
        "relationships": relationship_values,
        "statistics": serde_json::to_value(engine.statistics())?,
    }))
}

/// Canonical JSON as a pretty-printed string.
pub fn export_string(engine: &dyn GraphEngine) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(&export_value(engine)?)?)
}

pub fn export_to_path(engine: &dyn GraphEngine, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, export_string(engine)?)?;
    debug!(?path, "canonical JSON written");
    Ok(())
}

/// Parse one raw entity object, enforcing the declared field catalog.
///
/// Strict mode rejects unknown fields; lax mode routes them into the
/// explicit `extra` bag (stringified) so nothing is silently merged into
/// the schema fields.
pub fn parse_entity(raw: &Value, strict: bool) -> CoreResult<Entity> {
    let obj = raw.as_object().ok_or_else(|| CoreError::Validation {
        field: "entity".into(),
        message: "Entity must be a JSON object.".into(),
    })?;
    let type_str = obj
        .get("entity_type")
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::Validation {
            field: "entity_type".into(),
            message: "Missing entity_type discriminant.".into(),
        })?;
    let entity_type: EntityType = type_str.parse().map_err(|message| CoreError::SchemaViolation {
        message,
    })?;

    let unknown: Vec<&String> = obj
        .keys()
        .filter(|key| !catalog::is_declared(entity_type, key))
        .collect();

    if unknown.is_empty() {
        return Ok(serde_json::from_value(raw.clone()).map_err(|e| CoreError::Validation {
            field: "entity".into(),
            message: format!("Entity failed schema validation: {e}"),
        })?);
    }
    if strict {
        return Err(CoreError::Validation {
            field: "entity".into(),
            message: format!(
                "Unknown field(s) {unknown:?} on entity_type '{entity_type}' (strict mode)."
            ),
        });
    }

    // Lax mode: move undeclared keys into the extra bag.
    let mut cleaned = Map::new();
    let mut extra = Map::new();
    for (key, value) in obj {
        if catalog::is_declared(entity_type, key) {
            cleaned.insert(key.clone(), value.clone());
        } else {
            let as_string = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            extra.insert(key.clone(), Value::String(as_string));
        }
    }
    if let Some(Value::Object(existing)) = cleaned.get_mut("extra") {
        existing.extend(extra);
    } else {
        cleaned.insert("extra".into(), Value::Object(extra));
    }
    Ok(
        serde_json::from_value(Value::Object(cleaned)).map_err(|e| CoreError::Validation {
            field: "entity".into(),
            message: format!("Entity failed schema validation: {e}"),
        })?,
    )
}

/// Build a fresh engine from a canonical JSON value. All-or-nothing: any
/// parse or validation failure aborts with no engine returned.
pub fn import_value(value: &Value, options: &ImportOptions) -> CoreResult<Box<dyn GraphEngine>> {
    let entities_raw = value
        .get("entities")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::Validation {
            field: "entities".into(),
            message: "Canonical JSON must carry an 'entities' array.".into(),
        })?;
    let relationships_raw = value
        .get("relationships")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut entities = Vec::with_capacity(entities_raw.len());
    for (index, raw) in entities_raw.iter().enumerate() {
        let entity = parse_entity(raw, options.strict).map_err(|e| CoreError::Validation {
            field: format!("entities[{index}]"),
            message: e.to_string(),
        })?;
        entities.push(entity);
    }
    let mut relationships = Vec::with_capacity(relationships_raw.len());
    for (index, raw) in relationships_raw.iter().enumerate() {
        let rel: Relationship =
            serde_json::from_value(raw.clone()).map_err(|e| CoreError::Validation {
                field: format!("relationships[{index}]"),
                message: format!("Relationship failed schema validation: {e}"),
            })?;
        relationships.push(rel);
    }

    let mut engine = factory::create(&options.backend)?;
    engine.add_entities_bulk(entities)?;
    if !relationships.is_empty() {
        engine.add_relationships_bulk(relationships)?;
    }
    debug!(
        entities = engine.entity_count(None),
        relationships = engine.relationship_count(None),
        "import complete"
    );
    Ok(engine)
}

pub fn import_from_path(path: &Path, options: &ImportOptions) -> CoreResult<Box<dyn GraphEngine>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Persistence(format!("Failed to read {}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| CoreError::Persistence(format!("Invalid JSON in {}: {e}", path.display())))?;
    import_value(&value, options)
}
