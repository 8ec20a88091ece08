//! The default backend: an in-process directed multigraph with per-kind and
//! per-relationship-type inverted indexes for O(1) lookup and O(degree)
//! neighbour enumeration.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use tracing::debug;

use org_graph_core::error::{BatchItemError, CoreError, CoreResult};
use org_graph_core::schema::validate_relationship;
use org_graph_core::types::{Direction, Entity, EntityType, Relationship, RelationshipType};

use crate::engine::{EntityPatch, GraphEngine, GraphStatistics};

/// In-memory directed multigraph.
///
/// Entities and relationships are owned here for the duration of their life
/// in the graph; every accessor hands out independent copies.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    entities: HashMap<String, Entity>,
    entity_order: Vec<String>,
    by_kind: HashMap<EntityType, Vec<String>>,
    relationships: HashMap<String, Relationship>,
    rel_order: Vec<String>,
    by_rel_type: HashMap<RelationshipType, Vec<String>>,
    /// entity id → relationship ids where the entity is the source.
    outgoing: HashMap<String, Vec<String>>,
    /// entity id → relationship ids where the entity is the target.
    incoming: HashMap<String, Vec<String>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        MemoryGraph::default()
    }

    fn validate_new_entity(&self, entity: &Entity) -> CoreResult<()> {
        entity.validate()?;
        if self.entities.contains_key(&entity.id) {
            return Err(CoreError::IdCollision {
                id: entity.id.clone(),
            });
        }
        Ok(())
    }

    fn insert_entity_unchecked(&mut self, entity: Entity) -> String {
        let id = entity.id.clone();
        self.by_kind
            .entry(entity.entity_type())
            .or_default()
            .push(id.clone());
        self.entity_order.push(id.clone());
        self.outgoing.entry(id.clone()).or_default();
        self.incoming.entry(id.clone()).or_default();
        self.entities.insert(id.clone(), entity);
        id
    }

    fn validate_new_relationship(&self, rel: &Relationship) -> CoreResult<()> {
        rel.validate()?;
        if self.relationships.contains_key(&rel.id) {
            return Err(CoreError::IdCollision { id: rel.id.clone() });
        }
        let source = self
            .entities
            .get(&rel.source_id)
            .ok_or_else(|| CoreError::EntityNotFound {
                id: rel.source_id.clone(),
            })?;
        let target = self
            .entities
            .get(&rel.target_id)
            .ok_or_else(|| CoreError::EntityNotFound {
                id: rel.target_id.clone(),
            })?;
        validate_relationship(
            rel.relationship_type,
            source.entity_type(),
            target.entity_type(),
        )
    }

    fn insert_relationship_unchecked(&mut self, rel: Relationship) -> String {
        let id = rel.id.clone();
        self.by_rel_type
            .entry(rel.relationship_type)
            .or_default()
            .push(id.clone());
        self.rel_order.push(id.clone());
        self.outgoing
            .entry(rel.source_id.clone())
            .or_default()
            .push(id.clone());
        self.incoming
            .entry(rel.target_id.clone())
            .or_default()
            .push(id.clone());
        self.relationships.insert(id.clone(), rel);
        id
    }

    fn drop_relationship(&mut self, rel_id: &str) -> Option<Relationship> {
        let rel = self.relationships.remove(rel_id)?;
        self.rel_order.retain(|id| id != rel_id);
        if let Some(ids) = self.by_rel_type.get_mut(&rel.relationship_type) {
            ids.retain(|id| id != rel_id);
        }
        if let Some(ids) = self.outgoing.get_mut(&rel.source_id) {
            ids.retain(|id| id != rel_id);
        }
        if let Some(ids) = self.incoming.get_mut(&rel.target_id) {
            ids.retain(|id| id != rel_id);
        }
        Some(rel)
    }

    /// Incident relationship ids honouring direction and type filters, in
    /// insertion order per adjacency list.
    fn incident_rel_ids(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
    ) -> Vec<&String> {
        let mut ids: Vec<&String> = Vec::new();
        if direction.includes_out() {
            if let Some(out) = self.outgoing.get(entity_id) {
                ids.extend(out.iter());
            }
        }
        if direction.includes_in() {
            if let Some(inc) = self.incoming.get(entity_id) {
                ids.extend(inc.iter());
            }
        }
        match relationship_type {
            None => ids,
            Some(rt) => ids
                .into_iter()
                .filter(|id| {
                    self.relationships
                        .get(id.as_str())
                        .is_some_and(|r| r.relationship_type == rt)
                })
                .collect(),
        }
    }

    fn undirected_neighbor_ids(&self, entity_id: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for rel_id in self.incident_rel_ids(entity_id, Direction::Both, None) {
            if let Some(rel) = self.relationships.get(rel_id) {
                let other = if rel.source_id == entity_id {
                    &rel.target_id
                } else {
                    &rel.source_id
                };
                if seen.insert(other.clone()) {
                    out.push(other.clone());
                }
            }
        }
        out
    }
}

impl GraphEngine for MemoryGraph {
    fn add_entity(&mut self, entity: Entity) -> CoreResult<String> {
        self.validate_new_entity(&entity)?;
        Ok(self.insert_entity_unchecked(entity))
    }

    fn add_entities_bulk(&mut self, entities: Vec<Entity>) -> CoreResult<Vec<String>> {
        let mut batch_ids = HashSet::new();
        for entity in &entities {
            self.validate_new_entity(entity)?;
            if !batch_ids.insert(entity.id.clone()) {
                return Err(CoreError::IdCollision {
                    id: entity.id.clone(),
                });
            }
        }
        Ok(entities
            .into_iter()
            .map(|e| self.insert_entity_unchecked(e))
            .collect())
    }

    fn get_entity(&self, id: &str) -> Option<Entity> {
        self.entities.get(id).cloned()
    }

    fn update_entity(&mut self, id: &str, patch: &EntityPatch) -> CoreResult<Entity> {
        let current = self
            .entities
            .get(id)
            .ok_or_else(|| CoreError::EntityNotFound { id: id.to_string() })?;
        let updated = current.patched(patch)?;
        self.entities.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    fn remove_entity(&mut self, id: &str) -> bool {
        if !self.entities.contains_key(id) {
            return false;
        }
        let mut incident: Vec<String> = Vec::new();
        if let Some(out) = self.outgoing.get(id) {
            incident.extend(out.iter().cloned());
        }
        if let Some(inc) = self.incoming.get(id) {
            incident.extend(inc.iter().cloned());
        }
        for rel_id in incident {
            self.drop_relationship(&rel_id);
        }
        let Some(entity) = self.entities.remove(id) else {
            return false;
        };
        self.entity_order.retain(|e| e != id);
        if let Some(ids) = self.by_kind.get_mut(&entity.entity_type()) {
            ids.retain(|e| e != id);
        }
        self.outgoing.remove(id);
        self.incoming.remove(id);
        debug!(entity_id = id, "removed entity with cascade");
        true
    }

    fn list_entities(&self, entity_type: Option<EntityType>, limit: Option<usize>) -> Vec<Entity> {
        let order: &[String] = match entity_type {
            Some(t) => self.by_kind.get(&t).map(Vec::as_slice).unwrap_or(&[]),
            None => &self.entity_order,
        };
        let cap = limit.unwrap_or(usize::MAX);
        order
            .iter()
            .take(cap)
            .filter_map(|id| self.entities.get(id).cloned())
            .collect()
    }

    fn entity_count(&self, entity_type: Option<EntityType>) -> usize {
        match entity_type {
            Some(t) => self.by_kind.get(&t).map_or(0, Vec::len),
            None => self.entities.len(),
        }
    }

    fn add_relationship(&mut self, relationship: Relationship) -> CoreResult<String> {
        self.validate_new_relationship(&relationship)?;
        Ok(self.insert_relationship_unchecked(relationship))
    }

    fn add_relationships_bulk(
        &mut self,
        relationships: Vec<Relationship>,
    ) -> CoreResult<Vec<String>> {
        let mut errors: Vec<BatchItemError> = Vec::new();
        let mut batch_ids = HashSet::new();
        for (index, rel) in relationships.iter().enumerate() {
            if let Err(e) = self.validate_new_relationship(rel) {
                errors.push(BatchItemError {
                    index,
                    error: e.to_string(),
                });
                continue;
            }
            if !batch_ids.insert(rel.id.clone()) {
                errors.push(BatchItemError {
                    index,
                    error: format!("Id collision: '{}' duplicated within batch", rel.id),
                });
            }
        }
        if !errors.is_empty() {
            return Err(CoreError::BatchRejected { errors });
        }
        Ok(relationships
            .into_iter()
            .map(|r| self.insert_relationship_unchecked(r))
            .collect())
    }

    fn get_relationship(&self, id: &str) -> Option<Relationship> {
        self.relationships.get(id).cloned()
    }

    fn remove_relationship(&mut self, id: &str) -> bool {
        self.drop_relationship(id).is_some()
    }

    fn relationships(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
    ) -> Vec<Relationship> {
        self.incident_rel_ids(entity_id, direction, relationship_type)
            .into_iter()
            .filter_map(|id| self.relationships.get(id).cloned())
            .collect()
    }

    fn relationship_count(&self, relationship_type: Option<RelationshipType>) -> usize {
        match relationship_type {
            Some(t) => self.by_rel_type.get(&t).map_or(0, Vec::len),
            None => self.relationships.len(),
        }
    }

    fn neighbors(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
        entity_type: Option<EntityType>,
    ) -> Vec<Entity> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for rel_id in self.incident_rel_ids(entity_id, direction, relationship_type) {
            let Some(rel) = self.relationships.get(rel_id) else {
                continue;
            };
            let other = match direction {
                Direction::Out => &rel.target_id,
                Direction::In => &rel.source_id,
                Direction::Both => {
                    if rel.source_id == entity_id {
                        &rel.target_id
                    } else {
                        &rel.source_id
                    }
                }
            };
            if other.as_str() == entity_id || !seen.insert(other.clone()) {
                continue;
            }
            if let Some(entity) = self.entities.get(other) {
                if entity_type.map_or(true, |t| entity.entity_type() == t) {
                    out.push(entity.clone());
                }
            }
        }
        out
    }

    fn shortest_path(&self, source_id: &str, target_id: &str) -> Option<Vec<String>> {
        if !self.entities.contains_key(source_id) || !self.entities.contains_key(target_id) {
            return None;
        }
        if source_id == target_id {
            return Some(vec![source_id.to_string()]);
        }
        // Undirected BFS with predecessor tracking.
        let mut predecessor: HashMap<String, String> = HashMap::new();
        let mut visited: HashSet<String> = HashSet::from([source_id.to_string()]);
        let mut queue: VecDeque<String> = VecDeque::from([source_id.to_string()]);
        while let Some(current) = queue.pop_front() {
            for next in self.undirected_neighbor_ids(&current) {
                if !visited.insert(next.clone()) {
                    continue;
                }
                predecessor.insert(next.clone(), current.clone());
                if next == target_id {
                    let mut path = vec![target_id.to_string()];
                    let mut cursor = target_id;
                    while let Some(prev) = predecessor.get(cursor) {
                        path.push(prev.clone());
                        cursor = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(next);
            }
        }
        None
    }

    fn subgraph(&self, entity_ids: &[String]) -> Box<dyn GraphEngine> {
        let keep: HashSet<&String> = entity_ids.iter().collect();
        let mut sub = MemoryGraph::new();
        for id in &self.entity_order {
            if keep.contains(id) {
                if let Some(entity) = self.entities.get(id) {
                    sub.insert_entity_unchecked(entity.clone());
                }
            }
        }
        for id in &self.rel_order {
            if let Some(rel) = self.relationships.get(id) {
                if keep.contains(&rel.source_id) && keep.contains(&rel.target_id) {
                    sub.insert_relationship_unchecked(rel.clone());
                }
            }
        }
        Box::new(sub)
    }

    fn blast_radius(&self, entity_id: &str, max_depth: usize) -> BTreeMap<usize, Vec<Entity>> {
        let mut by_depth: BTreeMap<usize, Vec<Entity>> = BTreeMap::new();
        let Some(source) = self.entities.get(entity_id) else {
            return by_depth;
        };
        by_depth.insert(0, vec![source.clone()]);
        let mut visited: HashSet<String> = HashSet::from([entity_id.to_string()]);
        let mut frontier = vec![entity_id.to_string()];
        let mut depth = 0;
        while depth < max_depth && !frontier.is_empty() {
            depth += 1;
            let mut next = Vec::new();
            let mut layer = Vec::new();
            for id in &frontier {
                for neighbor_id in self.undirected_neighbor_ids(id) {
                    if visited.insert(neighbor_id.clone()) {
                        if let Some(entity) = self.entities.get(&neighbor_id) {
                            layer.push(entity.clone());
                        }
                        next.push(neighbor_id);
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

    fn degree_centrality(&self) -> BTreeMap<String, f64> {
        let n = self.entities.len();
        if n < 2 {
            return self.entity_order.iter().map(|id| (id.clone(), 0.0)).collect();
        }
        let denom = (n - 1) as f64;
        self.entity_order
            .iter()
            .map(|id| {
                let degree = self.outgoing.get(id).map_or(0, Vec::len)
                    + self.incoming.get(id).map_or(0, Vec::len);
                (id.clone(), degree as f64 / denom)
            })
            .collect()
    }

    fn betweenness_centrality(&self) -> CoreResult<BTreeMap<String, f64>> {
        Ok(crate::analytics::betweenness_centrality(self))
    }

    fn pagerank(&self) -> CoreResult<BTreeMap<String, f64>> {
        Ok(crate::analytics::pagerank(self).scores)
    }

    fn most_connected(&self, top_n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .entity_order
            .iter()
            .map(|id| {
                let degree = self.outgoing.get(id).map_or(0, Vec::len)
                    + self.incoming.get(id).map_or(0, Vec::len);
                (id.clone(), degree)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);
        ranked
    }

    fn statistics(&self) -> GraphStatistics {
        let n = self.entities.len();
        let m = self.relationships.len();
        let mut entity_type_counts = BTreeMap::new();
        for (kind, ids) in &self.by_kind {
            if !ids.is_empty() {
                entity_type_counts.insert(kind.as_str().to_string(), ids.len());
            }
        }
        let mut relationship_type_counts = BTreeMap::new();
        for (rt, ids) in &self.by_rel_type {
            if !ids.is_empty() {
                relationship_type_counts.insert(rt.as_str().to_string(), ids.len());
            }
        }
        let density = if n > 1 {
            m as f64 / (n as f64 * (n as f64 - 1.0))
        } else {
            0.0
        };
        GraphStatistics {
            total_entities: n,
            total_relationships: m,
            entity_type_counts,
            relationship_type_counts,
            density,
            is_weakly_connected: self.is_weakly_connected(),
        }
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.entity_order.clear();
        self.by_kind.clear();
        self.relationships.clear();
        self.rel_order.clear();
        self.by_rel_type.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }
}

impl MemoryGraph {
    fn is_weakly_connected(&self) -> bool {
        let Some(start) = self.entity_order.first() else {
            return true;
        };
        let mut visited: HashSet<String> = HashSet::from([start.clone()]);
        let mut queue: VecDeque<String> = VecDeque::from([start.clone()]);
        while let Some(current) = queue.pop_front() {
            for next in self.undirected_neighbor_ids(&current) {
                if visited.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }
        visited.len() == self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::types::kinds::{DataAsset, Department, Person, System};
    use org_graph_core::types::EntityKind;

    fn person(name: &str) -> Entity {
        Entity::new(name, EntityKind::Person(Person::default()))
    }

    fn system(name: &str) -> Entity {
        Entity::new(name, EntityKind::System(System::default()))
    }

    fn department(name: &str) -> Entity {
        Entity::new(name, EntityKind::Department(Department::default()))
    }

    #[test]
    fn add_and_get_round_trip() {
        let mut g = MemoryGraph::new();
        let e = person("Noor Haddad");
        let id = g.add_entity(e.clone()).unwrap();
        assert_eq!(g.get_entity(&id), Some(e));
        assert_eq!(g.entity_count(None), 1);
    }

    #[test]
    fn id_collision_is_rejected() {
        let mut g = MemoryGraph::new();
        let e = person("Dup");
        g.add_entity(e.clone()).unwrap();
        let err = g.add_entity(e).unwrap_err();
        assert!(matches!(err, CoreError::IdCollision { .. }));
    }

    #[test]
    fn bulk_entity_insert_is_atomic() {
        let mut g = MemoryGraph::new();
        let a = person("A");
        let mut b = person("B");
        b.id = a.id.clone(); // collide inside the batch
        let err = g.add_entities_bulk(vec![a, b]).unwrap_err();
        assert!(matches!(err, CoreError::IdCollision { .. }));
        assert_eq!(g.entity_count(None), 0);
    }

    #[test]
    fn relationship_requires_live_endpoints_and_schema() {
        let mut g = MemoryGraph::new();
        let p = person("P");
        let d = department("D");
        let s = system("S");
        let (pid, did, sid) = (p.id.clone(), d.id.clone(), s.id.clone());
        g.add_entities_bulk(vec![p, d, s]).unwrap();

        // works_in: person → department is fine.
        g.add_relationship(Relationship::new(RelationshipType::WorksIn, &pid, &did))
            .unwrap();
        // works_in: person → system violates the range.
        let err = g
            .add_relationship(Relationship::new(RelationshipType::WorksIn, &pid, &sid))
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainRangeViolation { .. }));
        // Dangling endpoint.
        let err = g
            .add_relationship(Relationship::new(RelationshipType::WorksIn, &pid, "ghost"))
            .unwrap_err();
        assert!(matches!(err, CoreError::EntityNotFound { .. }));
        assert_eq!(g.relationship_count(None), 1);
    }

    #[test]
    fn batch_relationships_all_or_nothing_with_item_report() {
        let mut g = MemoryGraph::new();
        let p = person("P");
        let d = department("D");
        let (pid, did) = (p.id.clone(), d.id.clone());
        g.add_entities_bulk(vec![p, d]).unwrap();

        let before = g.statistics();
        let batch = vec![
            Relationship::new(RelationshipType::WorksIn, &pid, &did),
            Relationship::new(RelationshipType::WorksIn, &did, &pid), // invalid
            Relationship::new(RelationshipType::MemberOf, &pid, &did),
        ];
        let err = g.add_relationships_bulk(batch).unwrap_err();
        match err {
            CoreError::BatchRejected { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].index, 1);
            }
            other => panic!("expected BatchRejected, got {other:?}"),
        }
        assert_eq!(g.statistics(), before);
    }

    #[test]
    fn multigraph_allows_parallel_edges() {
        let mut g = MemoryGraph::new();
        let a = system("A");
        let b = system("B");
        let (aid, bid) = (a.id.clone(), b.id.clone());
        g.add_entities_bulk(vec![a, b]).unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &aid, &bid))
            .unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &aid, &bid))
            .unwrap();
        assert_eq!(g.relationship_count(Some(RelationshipType::DependsOn)), 2);
        // Parallel edges still yield a single neighbour.
        assert_eq!(g.neighbors(&aid, Direction::Out, None, None).len(), 1);
    }

    #[test]
    fn remove_entity_cascades_to_relationships() {
        let mut g = MemoryGraph::new();
        let a = system("A");
        let b = system("B");
        let (aid, bid) = (a.id.clone(), b.id.clone());
        g.add_entities_bulk(vec![a, b]).unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &aid, &bid))
            .unwrap();
        assert!(g.remove_entity(&bid));
        assert_eq!(g.relationship_count(None), 0);
        assert!(g.relationships(&aid, Direction::Both, None).is_empty());
        assert!(!g.remove_entity(&bid));
    }

    #[test]
    fn update_entity_bumps_version_once() {
        let mut g = MemoryGraph::new();
        let p = person("P");
        let pid = p.id.clone();
        g.add_entity(p).unwrap();
        let mut patch = EntityPatch::new();
        patch.insert("title".into(), serde_json::json!("CTO"));
        let updated = g.update_entity(&pid, &patch).unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(g.get_entity(&pid).unwrap().version, 2);
    }

    #[test]
    fn shortest_path_is_undirected_and_handles_degenerate_case() {
        let mut g = MemoryGraph::new();
        let a = system("A");
        let b = system("B");
        let d = Entity::new("D", EntityKind::DataAsset(DataAsset::default()));
        let (aid, bid, did) = (a.id.clone(), b.id.clone(), d.id.clone());
        g.add_entities_bulk(vec![a, b, d]).unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &aid, &bid))
            .unwrap();
        g.add_relationship(Relationship::new(RelationshipType::Stores, &bid, &did))
            .unwrap();

        assert_eq!(g.shortest_path(&aid, &aid), Some(vec![aid.clone()]));
        // Walks against edge direction: data asset back to system A.
        assert_eq!(
            g.shortest_path(&did, &aid),
            Some(vec![did.clone(), bid.clone(), aid.clone()])
        );
        assert_eq!(g.shortest_path(&aid, "ghost"), None);
    }

    #[test]
    fn blast_radius_layers_follow_hop_depth() {
        // v -[depends_on]-> w -[stores]-> d, no other edges.
        let mut g = MemoryGraph::new();
        let v = system("v");
        let w = system("w");
        let d = Entity::new("d", EntityKind::DataAsset(DataAsset::default()));
        let (vid, wid, did) = (v.id.clone(), w.id.clone(), d.id.clone());
        g.add_entities_bulk(vec![v, w, d]).unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &vid, &wid))
            .unwrap();
        g.add_relationship(Relationship::new(RelationshipType::Stores, &wid, &did))
            .unwrap();

        let r2 = g.blast_radius(&vid, 2);
        assert_eq!(r2[&0].iter().map(|e| &e.id).collect::<Vec<_>>(), vec![&vid]);
        assert_eq!(r2[&1].iter().map(|e| &e.id).collect::<Vec<_>>(), vec![&wid]);
        assert_eq!(r2[&2].iter().map(|e| &e.id).collect::<Vec<_>>(), vec![&did]);

        let r1 = g.blast_radius(&vid, 1);
        assert_eq!(r1.len(), 2); // depths 0 and 1 only
        assert!(!r1.contains_key(&2));

        let r0 = g.blast_radius(&vid, 0);
        assert_eq!(r0.len(), 1);
        assert_eq!(r0[&0].len(), 1);
    }

    #[test]
    fn list_entities_preserves_insertion_order() {
        let mut g = MemoryGraph::new();
        let names = ["one", "two", "three"];
        for n in names {
            g.add_entity(person(n)).unwrap();
        }
        let listed: Vec<String> = g
            .list_entities(Some(EntityType::Person), None)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(listed, names);
        assert_eq!(g.list_entities(None, Some(2)).len(), 2);
    }

    #[test]
    fn statistics_reports_counts_density_and_connectivity() {
        let mut g = MemoryGraph::new();
        assert!(g.statistics().is_weakly_connected);
        let a = system("A");
        let b = system("B");
        let (aid, bid) = (a.id.clone(), b.id.clone());
        g.add_entities_bulk(vec![a, b]).unwrap();
        let stats = g.statistics();
        assert!(!stats.is_weakly_connected);
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &aid, &bid))
            .unwrap();
        let stats = g.statistics();
        assert!(stats.is_weakly_connected);
        assert_eq!(stats.total_entities, 2);
        assert_eq!(stats.total_relationships, 1);
        assert_eq!(stats.entity_type_counts["system"], 2);
        assert_eq!(stats.relationship_type_counts["depends_on"], 1);
        assert!((stats.density - 0.5).abs() < 1e-9);
    }

    #[test]
    fn subgraph_keeps_only_inner_edges() {
        let mut g = MemoryGraph::new();
        let a = system("A");
        let b = system("B");
        let c = system("C");
        let (aid, bid, cid) = (a.id.clone(), b.id.clone(), c.id.clone());
        g.add_entities_bulk(vec![a, b, c]).unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &aid, &bid))
            .unwrap();
        g.add_relationship(Relationship::new(RelationshipType::DependsOn, &bid, &cid))
            .unwrap();
        let sub = g.subgraph(&[aid.clone(), bid.clone()]);
        assert_eq!(sub.entity_count(None), 2);
        assert_eq!(sub.relationship_count(None), 1);
    }
}
