//! Tool handlers over the shared graph state.
//!
//! Every invocation moves through the same stages: authorise (registry
//! lookup), require-graph (inside the state service, which also runs the
//! mtime check), validate arguments, execute, serialise. A failure at any
//! stage produces an error reply and leaves the graph untouched.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use org_graph_core::error::{BatchItemError, CoreError, CoreResult, ErrorKind};
use org_graph_core::types::{
    clamp_round2, Direction, EntityType, Relationship, RelationshipType,
};
use org_graph_core::validation::validate_id_format;
use org_graph_engine::{analytics, search};
use org_graph_store::GraphState;

use crate::compact::{compact_entity, compact_relationship};
use crate::protocol::{AtpRequest, AtpResponse};
use crate::tools::{
    find_tool, DEFAULT_BLAST_DEPTH, DEFAULT_CENTRALITY_TOP_N, DEFAULT_LIST_LIMIT,
    DEFAULT_MOST_CONNECTED_TOP_N, DEFAULT_SEARCH_LIMIT, MAX_BATCH_SIZE,
};

/// Tool dispatcher state: the shared graph plus write authorisation.
pub struct Handlers {
    state: Arc<GraphState>,
    allow_writes: bool,
}

impl Handlers {
    pub fn new(state: Arc<GraphState>) -> Self {
        Handlers {
            state,
            allow_writes: true,
        }
    }

    /// Serve read tools only; write tools fail at the authorise stage.
    pub fn read_only(state: Arc<GraphState>) -> Self {
        Handlers {
            state,
            allow_writes: false,
        }
    }

    /// Dispatch one request through the stage machine.
    pub fn dispatch(&self, request: AtpRequest) -> AtpResponse {
        debug!(tool = %request.tool, "dispatching");
        // Authorise
        let Some(tool) = find_tool(&request.tool) else {
            return AtpResponse::failure(
                ErrorKind::Validation,
                format!("Unknown tool: {}", request.tool),
            );
        };
        if !tool.read_only && !self.allow_writes {
            return AtpResponse::failure(
                ErrorKind::Validation,
                "Write tools are disabled on this server.",
            );
        }
        let args = match request.arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        // Execute + serialise; RequireGraph happens inside the state calls.
        let result = match tool.name {
            "load_graph" => self.load_graph(args),
            "get_statistics" => self.get_statistics(),
            "list_entities" => self.list_entities(args),
            "get_entity" => self.get_entity(args),
            "get_neighbors" => self.get_neighbors(args),
            "find_shortest_path" => self.find_shortest_path(args),
            "get_blast_radius" => self.get_blast_radius(args),
            "compute_centrality" => self.compute_centrality(args),
            "find_most_connected" => self.find_most_connected(args),
            "search_entities" => self.search_entities(args),
            "add_relationship_tool" => self.add_relationship(args),
            "add_relationships_batch" => self.add_relationships_batch(args),
            "remove_relationship_tool" => self.remove_relationship(args),
            "add_entity_tool" => self.add_entity(args),
            "update_entity_tool" => self.update_entity(args),
            "remove_entity_tool" => self.remove_entity(args),
            other => Err(CoreError::Internal(format!("unrouted tool {other}"))),
        };
        match result {
            Ok(value) => AtpResponse::success(value),
            Err(error) => error.into(),
        }
    }

    // --- Read tools ---------------------------------------------------------

    fn load_graph(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            path: PathBuf,
        }
        let params: Params = parse_args(args)?;
        let stats = self.state.load(&params.path)?;
        Ok(json!({
            "entity_count": stats.total_entities,
            "relationship_count": stats.total_relationships,
            "path": params.path,
        }))
    }

    fn get_statistics(&self) -> CoreResult<Value> {
        let stats = self.state.with_graph(|engine| engine.statistics())?;
        Ok(serde_json::to_value(stats)?)
    }

    fn list_entities(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(rename = "type", default)]
            entity_type: Option<String>,
            #[serde(default)]
            limit: Option<usize>,
        }
        let params: Params = parse_args(args)?;
        let entity_type = parse_entity_type(params.entity_type.as_deref())?;
        let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let entities = self
            .state
            .with_graph(|engine| engine.list_entities(entity_type, Some(limit)))?;
        Ok(Value::Array(entities.iter().map(compact_entity).collect()))
    }

    fn get_entity(&self, args: Value) -> CoreResult<Value> {
        let id = required_id(&args, "id")?;
        let entity = self
            .state
            .with_graph(|engine| engine.get_entity(&id))?
            .ok_or(CoreError::EntityNotFound { id })?;
        Ok(compact_entity(&entity))
    }

    fn get_neighbors(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            id: String,
            #[serde(default)]
            direction: Option<String>,
            #[serde(default)]
            relationship_type: Option<String>,
        }
        let params: Params = parse_args(args)?;
        validate_id_format(&params.id)?;
        let direction = parse_direction(params.direction.as_deref())?;
        let relationship_type = parse_relationship_type(params.relationship_type.as_deref())?;

        self.state.with_graph(|engine| {
            if engine.get_entity(&params.id).is_none() {
                return Err(CoreError::EntityNotFound {
                    id: params.id.clone(),
                });
            }
            let neighbors = engine.neighbors(&params.id, direction, relationship_type, None);
            let rels = engine.relationships(&params.id, direction, relationship_type);
            let mut by_other: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
            for rel in &rels {
                let other = if rel.source_id == params.id {
                    rel.target_id.as_str()
                } else {
                    rel.source_id.as_str()
                };
                by_other
                    .entry(other)
                    .or_default()
                    .push(compact_relationship(rel));
            }
            Ok(Value::Array(
                neighbors
                    .iter()
                    .map(|entity| {
                        json!({
                            "entity": compact_entity(entity),
                            "relationships": by_other.get(entity.id.as_str()).cloned().unwrap_or_default(),
                        })
                    })
                    .collect(),
            ))
        })?
    }

    fn find_shortest_path(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            source_id: String,
            target_id: String,
        }
        let params: Params = parse_args(args)?;
        validate_id_format(&params.source_id)?;
        validate_id_format(&params.target_id)?;
        self.state.with_graph(|engine| {
            match analytics::attack_path(engine, &params.source_id, &params.target_id) {
                None => Value::Null,
                Some(path_ids) => {
                    let path: Vec<Value> = path_ids
                        .iter()
                        .map(|id| {
                            engine
                                .get_entity(id)
                                .map(|e| compact_entity(&e))
                                .unwrap_or_else(|| json!({"id": id}))
                        })
                        .collect();
                    json!({
                        "path_length": path_ids.len() - 1,
                        "path": path,
                    })
                }
            }
        })
    }

    fn get_blast_radius(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            id: String,
            #[serde(default)]
            max_depth: Option<usize>,
        }
        let params: Params = parse_args(args)?;
        validate_id_format(&params.id)?;
        let max_depth = params.max_depth.unwrap_or(DEFAULT_BLAST_DEPTH);
        self.state.with_graph(|engine| {
            if engine.get_entity(&params.id).is_none() {
                return Err(CoreError::EntityNotFound {
                    id: params.id.clone(),
                });
            }
            let by_depth = engine.blast_radius(&params.id, max_depth);
            let mut serialised = Map::new();
            let mut total = 0usize;
            for (depth, entities) in &by_depth {
                // Depth 0 is the source itself; responses list affected
                // entities from depth 1 outward.
                if *depth == 0 {
                    continue;
                }
                total += entities.len();
                serialised.insert(
                    depth.to_string(),
                    Value::Array(entities.iter().map(compact_entity).collect()),
                );
            }
            Ok(json!({
                "entity_id": params.id,
                "max_depth": max_depth,
                "total_affected": total,
                "by_depth": serialised,
            }))
        })?
    }

    fn compute_centrality(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default)]
            metric: Option<String>,
            #[serde(default)]
            top_n: Option<usize>,
        }
        let params: Params = parse_args(args)?;
        let metric = params.metric.unwrap_or_else(|| "degree".to_string());
        let top_n = params.top_n.unwrap_or(DEFAULT_CENTRALITY_TOP_N);
        self.state.with_graph(|engine| {
            let scores = match metric.as_str() {
                "degree" => engine.degree_centrality(),
                "betweenness" => engine.betweenness_centrality()?,
                "pagerank" => engine.pagerank()?,
                other => {
                    return Err(CoreError::Validation {
                        field: "metric".into(),
                        message: format!(
                            "Unknown metric '{other}'. Choose degree, betweenness, or pagerank."
                        ),
                    })
                }
            };
            let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            });
            ranked.truncate(top_n);
            Ok(Value::Array(
                ranked
                    .into_iter()
                    .filter_map(|(id, score)| {
                        engine.get_entity(&id).map(|entity| {
                            json!({
                                "id": id,
                                "name": entity.name,
                                "entity_type": entity.entity_type().as_str(),
                                "score": (score * 1e6).round() / 1e6,
                            })
                        })
                    })
                    .collect(),
            ))
        })?
    }

    fn find_most_connected(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default)]
            top_n: Option<usize>,
        }
        let params: Params = parse_args(args)?;
        let top_n = params.top_n.unwrap_or(DEFAULT_MOST_CONNECTED_TOP_N);
        self.state.with_graph(|engine| {
            Value::Array(
                engine
                    .most_connected(top_n)
                    .into_iter()
                    .filter_map(|(id, degree)| {
                        engine.get_entity(&id).map(|entity| {
                            json!({
                                "id": id,
                                "name": entity.name,
                                "entity_type": entity.entity_type().as_str(),
                                "degree": degree,
                            })
                        })
                    })
                    .collect(),
            )
        })
    }

    fn search_entities(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
            #[serde(rename = "type", default)]
            entity_type: Option<String>,
            #[serde(default)]
            limit: Option<usize>,
        }
        let params: Params = parse_args(args)?;
        if params.query.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "query".into(),
                message: "Search query must not be empty.".into(),
            });
        }
        let entity_type = parse_entity_type(params.entity_type.as_deref())?;
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        self.state.with_graph(|engine| {
            Value::Array(
                search::search_entities(engine, &params.query, entity_type, limit)
                    .into_iter()
                    .map(|hit| {
                        let mut value = compact_entity(&hit.entity);
                        if let Some(obj) = value.as_object_mut() {
                            obj.insert("match_score".into(), json!(hit.score));
                        }
                        value
                    })
                    .collect(),
            )
        })
    }

    // --- Write tools --------------------------------------------------------

    fn add_relationship(&self, args: Value) -> CoreResult<Value> {
        let rel = parse_relationship_item(&args)?;
        let compact = compact_relationship(&rel);
        let rel_id = self
            .state
            .with_graph_mut(|engine| engine.add_relationship(rel))?;
        Ok(json!({
            "status": "ok",
            "relationship_id": rel_id,
            "relationship": compact,
        }))
    }

    fn add_relationships_batch(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            relationships: Vec<Value>,
        }
        let params: Params = parse_args(args)?;
        if params.relationships.is_empty() {
            return Err(CoreError::Validation {
                field: "relationships".into(),
                message: "Empty relationships list.".into(),
            });
        }
        if params.relationships.len() > MAX_BATCH_SIZE {
            return Err(CoreError::Validation {
                field: "relationships".into(),
                message: format!(
                    "Too many relationships ({}). Maximum is {MAX_BATCH_SIZE} per batch.",
                    params.relationships.len()
                ),
            });
        }

        // Phase 1: parse every item; a single malformed item rejects the
        // whole batch before the graph is touched.
        let mut parsed = Vec::with_capacity(params.relationships.len());
        let mut errors = Vec::new();
        for (index, item) in params.relationships.iter().enumerate() {
            match parse_relationship_item(item) {
                Ok(rel) => parsed.push(rel),
                Err(e) => errors.push(BatchItemError {
                    index,
                    error: e.to_string(),
                }),
            }
        }
        if !errors.is_empty() {
            return Err(CoreError::BatchRejected { errors });
        }

        // Phase 2: validate-all-before-commit inside the engine, single
        // persist afterwards via the state service.
        let compact: Vec<Value> = parsed.iter().map(compact_relationship).collect();
        let ids = self
            .state
            .with_graph_mut(|engine| engine.add_relationships_bulk(parsed))?;
        Ok(json!({
            "status": "ok",
            "committed": ids.len(),
            "relationship_ids": ids,
            "relationships": compact,
        }))
    }

    fn remove_relationship(&self, args: Value) -> CoreResult<Value> {
        let id = required_id(&args, "relationship_id")?;
        let removed = self.state.with_graph_mut(|engine| {
            let rel = engine
                .get_relationship(&id)
                .ok_or_else(|| CoreError::RelationshipNotFound { id: id.clone() })?;
            engine.remove_relationship(&id);
            Ok(compact_relationship(&rel))
        })?;
        Ok(json!({"status": "ok", "removed": removed}))
    }

    fn add_entity(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            entity_type: String,
            name: String,
            #[serde(default)]
            description: Option<String>,
            #[serde(default)]
            properties: Option<Map<String, Value>>,
        }
        let params: Params = parse_args(args)?;
        // Assemble a raw object and run it through the strict importer
        // parser: same catalog, same unknown-field rejection.
        let mut raw = Map::new();
        raw.insert("id".into(), json!(uuid::Uuid::new_v4().to_string()));
        raw.insert("entity_type".into(), json!(params.entity_type));
        raw.insert("name".into(), json!(params.name));
        if let Some(description) = params.description {
            raw.insert("description".into(), json!(description));
        }
        if let Some(properties) = params.properties {
            for (key, value) in properties {
                raw.insert(key, value);
            }
        }
        let entity = org_graph_store::json::parse_entity(&Value::Object(raw), true)?;
        let compact = compact_entity(&entity);
        let entity_id = self
            .state
            .with_graph_mut(|engine| engine.add_entity(entity))?;
        Ok(json!({
            "status": "ok",
            "entity_id": entity_id,
            "entity": compact,
        }))
    }

    fn update_entity(&self, args: Value) -> CoreResult<Value> {
        #[derive(Deserialize)]
        struct Params {
            entity_id: String,
            updates: BTreeMap<String, Value>,
        }
        let params: Params = parse_args(args)?;
        validate_id_format(&params.entity_id)?;
        if params.updates.is_empty() {
            return Err(CoreError::Validation {
                field: "updates".into(),
                message: "No updates provided.".into(),
            });
        }
        let updated = self
            .state
            .with_graph_mut(|engine| engine.update_entity(&params.entity_id, &params.updates))?;
        Ok(json!({
            "status": "ok",
            "entity_id": params.entity_id,
            "entity": compact_entity(&updated),
        }))
    }

    fn remove_entity(&self, args: Value) -> CoreResult<Value> {
        let id = required_id(&args, "entity_id")?;
        let removed = self.state.with_graph_mut(|engine| {
            let entity = engine
                .get_entity(&id)
                .ok_or_else(|| CoreError::EntityNotFound { id: id.clone() })?;
            engine.remove_entity(&id);
            Ok(compact_entity(&entity))
        })?;
        Ok(json!({"status": "ok", "removed": removed}))
    }
}

// --- Argument parsing helpers -----------------------------------------------

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> CoreResult<T> {
    serde_json::from_value(args).map_err(|e| CoreError::Validation {
        field: "arguments".into(),
        message: format!("Invalid arguments: {e}"),
    })
}

fn required_id(args: &Value, field: &str) -> CoreResult<String> {
    let id = args
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::Validation {
            field: field.to_string(),
            message: "Missing required id.".into(),
        })?;
    validate_id_format(id)?;
    Ok(id.to_string())
}

fn parse_entity_type(raw: Option<&str>) -> CoreResult<Option<EntityType>> {
    match raw {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<EntityType>()
            .map(Some)
            .map_err(|message| CoreError::Validation {
                field: "type".into(),
                message,
            }),
    }
}

fn parse_relationship_type(raw: Option<&str>) -> CoreResult<Option<RelationshipType>> {
    match raw {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<RelationshipType>()
            .map(Some)
            .map_err(|message| CoreError::SchemaViolation { message }),
    }
}

fn parse_direction(raw: Option<&str>) -> CoreResult<Direction> {
    raw.unwrap_or("both")
        .parse::<Direction>()
        .map_err(|message| CoreError::Validation {
            field: "direction".into(),
            message,
        })
}

/// Parse one relationship write item: type in catalog, well-formed ids,
/// weight/confidence within `[0, 1]` (out-of-range is rejected, not
/// clamped).
fn parse_relationship_item(item: &Value) -> CoreResult<Relationship> {
    #[derive(Deserialize)]
    struct Item {
        relationship_type: String,
        source_id: String,
        target_id: String,
        #[serde(default)]
        weight: Option<f64>,
        #[serde(default)]
        confidence: Option<f64>,
        #[serde(default)]
        properties: Option<BTreeMap<String, Value>>,
    }
    let item: Item = parse_args(item.clone())?;
    let relationship_type: RelationshipType = item
        .relationship_type
        .parse()
        .map_err(|message| CoreError::SchemaViolation { message })?;
    validate_id_format(&item.source_id)?;
    validate_id_format(&item.target_id)?;
    for (field, value) in [("weight", item.weight), ("confidence", item.confidence)] {
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) || !v.is_finite() {
                return Err(CoreError::Validation {
                    field: field.into(),
                    message: format!("{field} must be within [0.0, 1.0], got {v}"),
                });
            }
        }
    }
    let mut rel = Relationship::new(relationship_type, item.source_id, item.target_id);
    rel.weight = clamp_round2(item.weight.unwrap_or(1.0));
    rel.confidence = clamp_round2(item.confidence.unwrap_or(1.0));
    rel.properties = item.properties.unwrap_or_default();
    Ok(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::types::kinds::{Department, Person, Policy, System};
    use org_graph_core::types::{Entity, EntityKind};
    use org_graph_engine::{factory, GraphEngine, MemoryGraph};
    use org_graph_store::ImportOptions;

    struct Fixture {
        handlers: Handlers,
        person_id: String,
        system_id: String,
        policy_id: String,
        _dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        factory::discover();
        let mut engine = MemoryGraph::new();
        let person = Entity::new("Rosa Silva", EntityKind::Person(Person::default()));
        let dept = Entity::new("Security", EntityKind::Department(Department::default()));
        let system = Entity::new("SIEM", EntityKind::System(System::default()));
        let policy = Entity::new("Access Policy", EntityKind::Policy(Policy::default()));
        let (person_id, system_id, policy_id) =
            (person.id.clone(), system.id.clone(), policy.id.clone());
        engine
            .add_entities_bulk(vec![person, dept, system, policy])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let state = Arc::new(GraphState::new(ImportOptions::default()));
        state.adopt(Box::new(engine), &path).unwrap();
        Fixture {
            handlers: Handlers::new(state),
            person_id,
            system_id,
            policy_id,
            _dir: dir,
        }
    }

    fn call(handlers: &Handlers, tool: &str, arguments: Value) -> AtpResponse {
        handlers.dispatch(AtpRequest {
            tool: tool.to_string(),
            arguments,
        })
    }

    #[test]
    fn unknown_tool_is_a_validation_error() {
        let fx = fixture();
        let response = call(&fx.handlers, "drop_everything", json!({}));
        assert_eq!(response.error.unwrap().kind, ErrorKind::Validation);
    }

    #[test]
    fn tools_fail_with_no_graph_loaded_before_load() {
        factory::discover();
        let state = Arc::new(GraphState::new(ImportOptions::default()));
        let handlers = Handlers::new(state);
        let response = call(&handlers, "get_statistics", json!({}));
        assert_eq!(response.error.unwrap().kind, ErrorKind::NoGraphLoaded);
    }

    #[test]
    fn schema_violating_write_is_rejected_with_graph_unchanged() {
        let fx = fixture();
        let before = call(&fx.handlers, "get_statistics", json!({}));

        // governs requires a policy source; a person source must fail.
        let response = call(
            &fx.handlers,
            "add_relationship_tool",
            json!({
                "relationship_type": "governs",
                "source_id": fx.person_id,
                "target_id": fx.system_id,
            }),
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::SchemaViolation);

        let after = call(&fx.handlers, "get_statistics", json!({}));
        assert_eq!(before.result, after.result);
    }

    #[test]
    fn valid_write_commits_and_serialises_compactly() {
        let fx = fixture();
        let response = call(
            &fx.handlers,
            "add_relationship_tool",
            json!({
                "relationship_type": "governs",
                "source_id": fx.policy_id,
                "target_id": fx.system_id,
                "weight": 0.8,
                "confidence": 0.92,
                "properties": {"enforcement": "mandatory"},
            }),
        );
        let result = response.result.expect("write succeeds");
        assert_eq!(result["status"], "ok");
        assert_eq!(result["relationship"]["weight"], 0.8);
        assert!(result["relationship"].get("created_at").is_none());
    }

    #[test]
    fn out_of_range_weight_is_rejected_not_clamped() {
        let fx = fixture();
        let response = call(
            &fx.handlers,
            "add_relationship_tool",
            json!({
                "relationship_type": "governs",
                "source_id": fx.policy_id,
                "target_id": fx.system_id,
                "weight": 1.5,
            }),
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::Validation);
    }

    #[test]
    fn batch_with_one_bad_item_rejects_everything() {
        let fx = fixture();
        let before = call(&fx.handlers, "get_statistics", json!({}));
        let response = call(
            &fx.handlers,
            "add_relationships_batch",
            json!({
                "relationships": [
                    {"relationship_type": "governs", "source_id": fx.policy_id, "target_id": fx.system_id},
                    {"relationship_type": "governs", "source_id": fx.person_id, "target_id": fx.system_id},
                    {"relationship_type": "targets", "source_id": fx.person_id, "target_id": fx.system_id},
                ],
            }),
        );
        let error = response.error.expect("batch rejected");
        assert_eq!(error.kind, ErrorKind::BatchRejected);
        let items = error.items.expect("per-item report");
        let indexes: Vec<u64> = items
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["index"].as_u64().unwrap())
            .collect();
        assert!(indexes.contains(&1));

        let after = call(&fx.handlers, "get_statistics", json!({}));
        assert_eq!(before.result, after.result);
    }

    #[test]
    fn oversized_batches_are_refused_up_front() {
        let fx = fixture();
        let items: Vec<Value> = (0..501)
            .map(|_| {
                json!({"relationship_type": "governs", "source_id": fx.policy_id, "target_id": fx.system_id})
            })
            .collect();
        let response = call(
            &fx.handlers,
            "add_relationships_batch",
            json!({"relationships": items}),
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::Validation);
    }

    #[test]
    fn read_responses_never_carry_stripped_fields() {
        let fx = fixture();
        let response = call(
            &fx.handlers,
            "get_entity",
            json!({"id": fx.person_id}),
        );
        let entity = response.result.unwrap();
        for field in crate::compact::STRIPPED_FIELDS {
            assert!(entity.get(*field).is_none(), "{field} leaked");
        }
    }

    #[test]
    fn neighbors_carry_their_connecting_relationships() {
        let fx = fixture();
        call(
            &fx.handlers,
            "add_relationship_tool",
            json!({
                "relationship_type": "governs",
                "source_id": fx.policy_id,
                "target_id": fx.system_id,
            }),
        )
        .result
        .expect("setup write");
        let response = call(
            &fx.handlers,
            "get_neighbors",
            json!({"id": fx.policy_id, "direction": "out"}),
        );
        let neighbors = response.result.unwrap();
        assert_eq!(neighbors.as_array().unwrap().len(), 1);
        assert_eq!(
            neighbors[0]["relationships"][0]["relationship_type"],
            "governs"
        );
    }

    #[test]
    fn shortest_path_of_disconnected_pair_is_null() {
        let fx = fixture();
        let response = call(
            &fx.handlers,
            "find_shortest_path",
            json!({"source_id": fx.person_id, "target_id": fx.system_id}),
        );
        assert_eq!(response.result, Some(Value::Null));
    }

    #[test]
    fn read_only_handlers_refuse_write_tools() {
        factory::discover();
        let state = Arc::new(GraphState::new(ImportOptions::default()));
        let handlers = Handlers::read_only(state);
        let response = call(
            &handlers,
            "remove_relationship_tool",
            json!({"relationship_id": "r-1"}),
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::Validation);
    }

    #[test]
    fn entity_write_tools_round_trip() {
        let fx = fixture();
        let created = call(
            &fx.handlers,
            "add_entity_tool",
            json!({
                "entity_type": "system",
                "name": "Build Cache",
                "description": "Artifact cache for CI",
                "properties": {"criticality": "low", "environment": "production"},
            }),
        )
        .result
        .expect("create succeeds");
        let entity_id = created["entity_id"].as_str().unwrap().to_string();

        let updated = call(
            &fx.handlers,
            "update_entity_tool",
            json!({"entity_id": entity_id, "updates": {"environment": "staging"}}),
        )
        .result
        .expect("update succeeds");
        assert_eq!(updated["entity"]["environment"], "staging");

        let removed = call(
            &fx.handlers,
            "remove_entity_tool",
            json!({"entity_id": entity_id}),
        )
        .result
        .expect("remove succeeds");
        assert_eq!(removed["status"], "ok");

        let gone = call(&fx.handlers, "get_entity", json!({"id": entity_id}));
        assert_eq!(gone.error.unwrap().kind, ErrorKind::NotFound);
    }

    #[test]
    fn add_entity_rejects_undeclared_properties() {
        let fx = fixture();
        let response = call(
            &fx.handlers,
            "add_entity_tool",
            json!({
                "entity_type": "system",
                "name": "Mystery Box",
                "properties": {"criticality": "low", "warp_factor": 9},
            }),
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::Validation);
    }
}
