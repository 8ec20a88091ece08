//! End-to-end scenarios for the synthetic pipeline: scale expectations,
//! seed determinism, structural invariants, and department subdivision.

use std::collections::{HashMap, HashSet};

use org_graph_core::risk::risk_level;
use org_graph_core::schema::validate_relationship;
use org_graph_core::types::{Direction, Entity, EntityKind, EntityType, Relationship};
use org_graph_engine::{GraphEngine, MemoryGraph};
use org_graph_synth::{profiles, Orchestrator};

fn generate(employees: u32, seed: u64) -> MemoryGraph {
    let mut engine = MemoryGraph::new();
    Orchestrator::new(profiles::tech_company("Acme Technologies", employees), seed)
        .generate(&mut engine)
        .expect("pipeline succeeds");
    engine
}

fn all_relationships(engine: &MemoryGraph) -> Vec<Relationship> {
    engine
        .list_entities(None, None)
        .iter()
        .flat_map(|e| engine.relationships(&e.id, Direction::Out, None))
        .collect()
}

#[test]
fn hundred_employee_tech_org_lands_in_expected_scale() {
    let engine = generate(100, 42);
    let stats = engine.statistics();
    assert!(
        (240..=330).contains(&stats.total_entities),
        "entity count {} outside expected band",
        stats.total_entities
    );
    assert!(
        (450..=800).contains(&stats.total_relationships),
        "relationship count {} outside expected band",
        stats.total_relationships
    );
    assert_eq!(stats.entity_type_counts["person"], 100);
    assert_eq!(stats.entity_type_counts["department"], 10);

    let quality = org_graph_synth::assess(&engine);
    assert!(
        quality.overall_score >= 0.95,
        "quality {} below expectation: {:?}",
        quality.overall_score,
        quality.warnings
    );
}

#[test]
fn same_seed_reproduces_ids_exactly() {
    let first = generate(100, 42);
    let second = generate(100, 42);

    let ids = |engine: &MemoryGraph| -> Vec<(String, String)> {
        engine
            .list_entities(None, None)
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));

    let rel_ids = |engine: &MemoryGraph| -> Vec<String> {
        all_relationships(engine).into_iter().map(|r| r.id).collect()
    };
    assert_eq!(rel_ids(&first), rel_ids(&second));
}

#[test]
fn different_seeds_produce_different_graphs() {
    let first = generate(100, 1);
    let second = generate(100, 2);
    let first_ids: HashSet<String> = first.list_entities(None, None).into_iter().map(|e| e.id).collect();
    let second_ids: HashSet<String> = second.list_entities(None, None).into_iter().map(|e| e.id).collect();
    assert!(first_ids.is_disjoint(&second_ids));
}

#[test]
fn universal_invariants_hold_for_a_generated_graph() {
    let engine = generate(300, 7);
    let entities = engine.list_entities(None, None);
    let relationships = all_relationships(&engine);

    // Id uniqueness.
    let entity_ids: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(entity_ids.len(), entities.len());
    let rel_ids: HashSet<&str> = relationships.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(rel_ids.len(), relationships.len());

    let kind_of: HashMap<&str, EntityType> = entities
        .iter()
        .map(|e| (e.id.as_str(), e.entity_type()))
        .collect();

    for rel in &relationships {
        // Referential integrity.
        assert!(entity_ids.contains(rel.source_id.as_str()), "dangling source");
        assert!(entity_ids.contains(rel.target_id.as_str()), "dangling target");
        // Schema conformance.
        validate_relationship(
            rel.relationship_type,
            kind_of[rel.source_id.as_str()],
            kind_of[rel.target_id.as_str()],
        )
        .unwrap_or_else(|e| panic!("schema violation: {e}"));
        // Metadata range and rounding.
        assert!((0.0..=1.0).contains(&rel.weight));
        assert!((0.0..=1.0).contains(&rel.confidence));
        assert_eq!(rel.weight, (rel.weight * 100.0).round() / 100.0);
        // Temporal.
        assert!(rel.updated_at >= rel.created_at);
    }

    for entity in &entities {
        assert!(entity.updated_at >= entity.created_at);
        assert!(entity.version >= 1);
        if let EntityKind::Risk(risk) = &entity.kind {
            assert_eq!(risk.inherent_risk_level, risk_level(risk.likelihood, risk.impact));
            assert!(risk.residual_risk_level <= risk.inherent_risk_level);
        }
        if let EntityKind::DataFlow(flow) = &entity.kind {
            if flow.classification.requires_encryption() {
                assert!(flow.encryption_in_transit);
            }
        }
    }
}

#[test]
fn large_org_subdivides_engineering_with_senior_roles() {
    let engine = generate(14_000, 42);

    let departments = engine.list_entities(Some(EntityType::Department), None);
    let root = departments
        .iter()
        .find(|d| d.name == "Engineering")
        .expect("engineering root exists");
    let root_fields = match &root.kind {
        EntityKind::Department(dept) => dept,
        _ => panic!("wrong kind"),
    };
    assert!(root_fields.parent_department_id.is_none());

    let subs: Vec<&Entity> = departments
        .iter()
        .filter(|d| match &d.kind {
            EntityKind::Department(dept) => {
                dept.parent_department_id.as_deref() == Some(root.id.as_str())
            }
            _ => false,
        })
        .collect();
    assert!(subs.len() >= 5, "only {} sub-departments", subs.len());

    let roles = engine.list_entities(Some(EntityType::Role), None);
    for sub in subs {
        let has_levelled_role = roles.iter().any(|r| match &r.kind {
            EntityKind::Role(role) => {
                role.department_id.as_deref() == Some(sub.id.as_str())
                    && (r.name.starts_with("Senior ") || r.name.starts_with("Staff "))
            }
            _ => false,
        });
        assert!(has_levelled_role, "no Senior/Staff role in {}", sub.name);
    }
}

#[test]
fn mirror_fields_are_consistent_with_edges() {
    let engine = generate(150, 11);
    let people = engine.list_entities(Some(EntityType::Person), None);
    for person in &people {
        let EntityKind::Person(fields) = &person.kind else {
            continue;
        };
        let dept = fields.department_id.as_ref().expect("person has department");
        // The mirror agrees with the works_in edge.
        let works_in: Vec<Relationship> = engine
            .relationships(&person.id, Direction::Out, None)
            .into_iter()
            .filter(|r| {
                r.relationship_type == org_graph_core::types::RelationshipType::WorksIn
            })
            .collect();
        assert_eq!(works_in.len(), 1);
        assert_eq!(&works_in[0].target_id, dept);
        // Mirror update bumped the version past 1.
        assert!(person.version >= 2);
    }
}
