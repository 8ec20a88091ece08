//! The engine abstraction: every consumer of the graph goes through this
//! trait. Backends are interchangeable behind [`crate::factory`]; consumers
//! hold a `Box<dyn GraphEngine>` and never a concrete type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use org_graph_core::error::{CoreError, CoreResult};
use org_graph_core::types::{Direction, Entity, EntityType, Relationship, RelationshipType};

/// Sparse field patch applied by `update_entity`.
pub type EntityPatch = BTreeMap<String, serde_json::Value>;

/// Summary statistics over the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_entities: usize,
    pub total_relationships: usize,
    pub entity_type_counts: BTreeMap<String, usize>,
    pub relationship_type_counts: BTreeMap<String, usize>,
    /// Edge density of the directed multigraph: `m / (n·(n−1))`.
    pub density: f64,
    pub is_weakly_connected: bool,
}

/// Uniform interface over graph storage backends.
///
/// Mutating operations validate before touching state and never leave the
/// graph half-written. Missing optional edges produce empty results, not
/// errors.
pub trait GraphEngine: Send + Sync + std::fmt::Debug {
    // --- Entity CRUD ---

    /// Add an entity. Fails on id collision or invalid base fields.
    fn add_entity(&mut self, entity: Entity) -> CoreResult<String>;

    /// Add several entities atomically: either all are inserted or none.
    fn add_entities_bulk(&mut self, entities: Vec<Entity>) -> CoreResult<Vec<String>>;

    /// Fetch a snapshot copy of an entity.
    fn get_entity(&self, id: &str) -> Option<Entity>;

    /// Apply a sparse patch copy-validate-write style; bumps `version` by
    /// exactly one on success.
    fn update_entity(&mut self, id: &str, patch: &EntityPatch) -> CoreResult<Entity>;

    /// Remove an entity, cascading to every incident relationship.
    /// Returns false if the id is unknown.
    fn remove_entity(&mut self, id: &str) -> bool;

    /// List entities in stable insertion order, optionally filtered by kind
    /// and truncated to `limit`.
    fn list_entities(&self, entity_type: Option<EntityType>, limit: Option<usize>) -> Vec<Entity>;

    fn entity_count(&self, entity_type: Option<EntityType>) -> usize;

    // --- Relationship CRUD ---

    /// Add a relationship. Validates endpoint existence and the declared
    /// domain × range before mutating.
    fn add_relationship(&mut self, relationship: Relationship) -> CoreResult<String>;

    /// Validate every relationship first; commit all or reject the batch
    /// with a per-item error report.
    fn add_relationships_bulk(&mut self, relationships: Vec<Relationship>)
        -> CoreResult<Vec<String>>;

    fn get_relationship(&self, id: &str) -> Option<Relationship>;

    /// Returns false if the id is unknown.
    fn remove_relationship(&mut self, id: &str) -> bool;

    /// Relationships incident to an entity, filtered by direction and type.
    fn relationships(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
    ) -> Vec<Relationship>;

    fn relationship_count(&self, relationship_type: Option<RelationshipType>) -> usize;

    // --- Traversal ---

    /// Adjacent entities, deduplicated, with optional relationship-type and
    /// entity-kind filters.
    fn neighbors(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
        entity_type: Option<EntityType>,
    ) -> Vec<Entity>;

    /// Shortest path treating edges as undirected; `Some(vec![v])` for
    /// `shortest_path(v, v)`, `None` when unreachable or unknown.
    fn shortest_path(&self, source_id: &str, target_id: &str) -> Option<Vec<String>>;

    /// Extract an independent engine containing only the given entities and
    /// the relationships among them.
    fn subgraph(&self, entity_ids: &[String]) -> Box<dyn GraphEngine>;

    /// Layered undirected BFS: depth → entities at that depth. Depth 0
    /// contains exactly the source. Default implementation walks
    /// [`GraphEngine::neighbors`]; backends may override with an indexed
    /// version.
    fn blast_radius(&self, entity_id: &str, max_depth: usize) -> BTreeMap<usize, Vec<Entity>> {
        let mut by_depth: BTreeMap<usize, Vec<Entity>> = BTreeMap::new();
        let Some(source) = self.get_entity(entity_id) else {
            return by_depth;
        };
        let mut visited: std::collections::HashSet<String> =
            std::collections::HashSet::from([entity_id.to_string()]);
        by_depth.insert(0, vec![source]);
        let mut frontier = vec![entity_id.to_string()];
        let mut depth = 0;
        while depth < max_depth && !frontier.is_empty() {
            depth += 1;
            let mut next = Vec::new();
            let mut layer = Vec::new();
            for id in &frontier {
                for neighbor in self.neighbors(id, Direction::Both, None, None) {
                    if visited.insert(neighbor.id.clone()) {
                        next.push(neighbor.id.clone());
                        layer.push(neighbor);
                    }
                }
            }
            if !layer.is_empty() {
                by_depth.insert(depth, layer);
            }
            frontier = next;
        }
        by_depth
    }

    // --- Analytics ---

    /// Degree centrality `deg(v) / (n−1)`. Default fallback enumerates
    /// incident relationships per entity.
    fn degree_centrality(&self) -> BTreeMap<String, f64> {
        let entities = self.list_entities(None, None);
        let n = entities.len();
        if n < 2 {
            return entities.into_iter().map(|e| (e.id, 0.0)).collect();
        }
        let denom = (n - 1) as f64;
        entities
            .into_iter()
            .map(|e| {
                let degree = self.relationships(&e.id, Direction::Both, None).len();
                (e.id, degree as f64 / denom)
            })
            .collect()
    }

    /// Betweenness centrality. Lightweight backends may not provide it.
    fn betweenness_centrality(&self) -> CoreResult<BTreeMap<String, f64>> {
        Err(CoreError::Unsupported {
            operation: "betweenness_centrality".into(),
            hint: "use degree centrality, or a backend with path analytics".into(),
        })
    }

    /// PageRank. Lightweight backends may not provide it.
    fn pagerank(&self) -> CoreResult<BTreeMap<String, f64>> {
        Err(CoreError::Unsupported {
            operation: "pagerank".into(),
            hint: "use degree centrality, or a backend with path analytics".into(),
        })
    }

    /// Top entities by raw degree, ties broken by insertion order.
    fn most_connected(&self, top_n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .list_entities(None, None)
            .into_iter()
            .map(|e| {
                let degree = self.relationships(&e.id, Direction::Both, None).len();
                (e.id, degree)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);
        ranked
    }

    // --- Introspection ---

    fn statistics(&self) -> GraphStatistics;

    /// Remove all entities and relationships.
    fn clear(&mut self);
}
