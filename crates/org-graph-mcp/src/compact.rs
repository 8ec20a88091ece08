//! Compact serialisation: the response-shaping transform shared by the ATP
//! and REST adapters.
//!
//! Strips `null`s, empty strings, empty collections, the temporal fields,
//! and the metadata bag. Exports are unaffected and keep full fidelity.

use serde_json::Value;

use org_graph_core::types::{Entity, Relationship};

/// Fields stripped from every compact response.
pub const STRIPPED_FIELDS: &[&str] = &[
    "created_at",
    "updated_at",
    "valid_from",
    "valid_until",
    "version",
    "metadata",
];

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn compact_object(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, v)| {
                    !STRIPPED_FIELDS.contains(&key.as_str()) && !is_empty_value(v)
                })
                .collect(),
        ),
        other => other,
    }
}

/// Compact JSON form of an entity.
pub fn compact_entity(entity: &Entity) -> Value {
    compact_object(serde_json::to_value(entity).unwrap_or(Value::Null))
}

/// Compact JSON form of a relationship.
pub fn compact_relationship(relationship: &Relationship) -> Value {
    compact_object(serde_json::to_value(relationship).unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::types::kinds::Person;
    use org_graph_core::types::{EntityKind, RelationshipType};

    #[test]
    fn compact_strips_temporal_metadata_and_empties() {
        let mut entity = Entity::new(
            "Ada Park",
            EntityKind::Person(Person {
                first_name: "Ada".into(),
                last_name: "Park".into(),
                ..Person::default()
            }),
        );
        entity
            .metadata
            .insert("source".into(), serde_json::json!("hr_feed"));
        let compact = compact_entity(&entity);
        let obj = compact.as_object().unwrap();
        for field in STRIPPED_FIELDS {
            assert!(!obj.contains_key(*field), "{field} leaked into response");
        }
        // Empty strings and lists are gone; real fields stay.
        assert!(!obj.contains_key("email"));
        assert!(!obj.contains_key("holds_roles"));
        assert_eq!(obj["first_name"], "Ada");
        assert_eq!(obj["entity_type"], "person");
        assert_eq!(obj["name"], "Ada Park");
    }

    #[test]
    fn compact_relationship_keeps_endpoint_ids_and_scores() {
        let rel = Relationship::new(RelationshipType::DependsOn, "a", "b").with_weight(0.62);
        let compact = compact_relationship(&rel);
        assert_eq!(compact["source_id"], "a");
        assert_eq!(compact["weight"], 0.62);
        assert!(compact.get("created_at").is_none());
        assert!(compact.get("properties").is_none());
    }
}
