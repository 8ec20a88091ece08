//! High-level graph facade: a boxed engine plus the mutation event log.

use std::collections::BTreeMap;

use org_graph_core::error::CoreResult;
use org_graph_core::types::{Direction, Entity, EntityType, Relationship, RelationshipType};

use crate::engine::{EntityPatch, GraphEngine, GraphStatistics};
use crate::events::{EventLog, GraphEvent, MutationType};

/// The main entry point for graph consumers: wraps an engine chosen through
/// the factory and records every mutation in a bounded event log.
pub struct KnowledgeGraph {
    engine: Box<dyn GraphEngine>,
    events: EventLog,
}

impl KnowledgeGraph {
    /// Wrap an engine created elsewhere (usually via [`crate::factory`]).
    pub fn with_engine(engine: Box<dyn GraphEngine>) -> Self {
        KnowledgeGraph {
            engine,
            events: EventLog::default(),
        }
    }

    /// Create a graph on the named backend.
    pub fn with_backend(backend: &str) -> CoreResult<Self> {
        Ok(KnowledgeGraph::with_engine(crate::factory::create(backend)?))
    }

    // --- Entity operations ---

    pub fn add_entity(&mut self, entity: Entity) -> CoreResult<String> {
        let entity_type = entity.entity_type().as_str().to_string();
        let id = self.engine.add_entity(entity)?;
        self.events
            .record(GraphEvent::entity(MutationType::Create, &entity_type, &id));
        Ok(id)
    }

    pub fn add_entities_bulk(&mut self, entities: Vec<Entity>) -> CoreResult<Vec<String>> {
        let kinds: Vec<String> = entities
            .iter()
            .map(|e| e.entity_type().as_str().to_string())
            .collect();
        let ids = self.engine.add_entities_bulk(entities)?;
        for (kind, id) in kinds.iter().zip(ids.iter()) {
            self.events
                .record(GraphEvent::entity(MutationType::Create, kind, id));
        }
        Ok(ids)
    }

    pub fn get_entity(&self, id: &str) -> Option<Entity> {
        self.engine.get_entity(id)
    }

    pub fn update_entity(&mut self, id: &str, patch: &EntityPatch) -> CoreResult<Entity> {
        let updated = self.engine.update_entity(id, patch)?;
        self.events.record(GraphEvent::entity(
            MutationType::Update,
            updated.entity_type().as_str(),
            id,
        ));
        Ok(updated)
    }

    pub fn remove_entity(&mut self, id: &str) -> bool {
        let entity_type = self
            .engine
            .get_entity(id)
            .map(|e| e.entity_type().as_str().to_string());
        let removed = self.engine.remove_entity(id);
        if removed {
            if let Some(kind) = entity_type {
                self.events
                    .record(GraphEvent::entity(MutationType::Delete, &kind, id));
            }
        }
        removed
    }

    pub fn list_entities(
        &self,
        entity_type: Option<EntityType>,
        limit: Option<usize>,
    ) -> Vec<Entity> {
        self.engine.list_entities(entity_type, limit)
    }

    pub fn entity_count(&self, entity_type: Option<EntityType>) -> usize {
        self.engine.entity_count(entity_type)
    }

    // --- Relationship operations ---

    pub fn add_relationship(&mut self, relationship: Relationship) -> CoreResult<String> {
        let id = self.engine.add_relationship(relationship)?;
        self.events
            .record(GraphEvent::relationship(MutationType::Link, &id));
        Ok(id)
    }

    pub fn add_relationships_bulk(
        &mut self,
        relationships: Vec<Relationship>,
    ) -> CoreResult<Vec<String>> {
        let ids = self.engine.add_relationships_bulk(relationships)?;
        for id in &ids {
            self.events
                .record(GraphEvent::relationship(MutationType::Link, id));
        }
        Ok(ids)
    }

    pub fn get_relationship(&self, id: &str) -> Option<Relationship> {
        self.engine.get_relationship(id)
    }

    pub fn remove_relationship(&mut self, id: &str) -> bool {
        let removed = self.engine.remove_relationship(id);
        if removed {
            self.events
                .record(GraphEvent::relationship(MutationType::Unlink, id));
        }
        removed
    }

    pub fn relationships(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
    ) -> Vec<Relationship> {
        self.engine
            .relationships(entity_id, direction, relationship_type)
    }

    pub fn relationship_count(&self, relationship_type: Option<RelationshipType>) -> usize {
        self.engine.relationship_count(relationship_type)
    }

    // --- Traversal & analytics passthrough ---

    pub fn neighbors(
        &self,
        entity_id: &str,
        direction: Direction,
        relationship_type: Option<RelationshipType>,
        entity_type: Option<EntityType>,
    ) -> Vec<Entity> {
        self.engine
            .neighbors(entity_id, direction, relationship_type, entity_type)
    }

    pub fn shortest_path(&self, source_id: &str, target_id: &str) -> Option<Vec<String>> {
        self.engine.shortest_path(source_id, target_id)
    }

    pub fn blast_radius(&self, entity_id: &str, max_depth: usize) -> BTreeMap<usize, Vec<Entity>> {
        self.engine.blast_radius(entity_id, max_depth)
    }

    pub fn statistics(&self) -> GraphStatistics {
        self.engine.statistics()
    }

    /// Direct access for analytics helpers and exporters.
    pub fn engine(&self) -> &dyn GraphEngine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn GraphEngine {
        self.engine.as_mut()
    }

    /// Most recent mutation events, oldest first.
    pub fn recent_events(&self, count: usize) -> Vec<GraphEvent> {
        self.events.recent(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::types::kinds::{Department, Person};
    use org_graph_core::types::EntityKind;

    #[test]
    fn facade_records_mutations() {
        crate::factory::discover();
        let mut kg = KnowledgeGraph::with_backend("memory").unwrap();
        let p = Entity::new("P", EntityKind::Person(Person::default()));
        let d = Entity::new("D", EntityKind::Department(Department::default()));
        let (pid, did) = (p.id.clone(), d.id.clone());
        kg.add_entities_bulk(vec![p, d]).unwrap();
        let rel_id = kg
            .add_relationship(Relationship::new(RelationshipType::WorksIn, &pid, &did))
            .unwrap();
        kg.remove_relationship(&rel_id);

        let events = kg.recent_events(10);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].mutation_type, MutationType::Create);
        assert_eq!(events[2].mutation_type, MutationType::Link);
        assert_eq!(events[3].mutation_type, MutationType::Unlink);
    }
}
