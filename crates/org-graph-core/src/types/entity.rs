//! The entity value: base identity + temporal tracking + kind payload.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::kinds::{EntityKind, EntityType, ExtraBag};

/// Current UTC time truncated to millisecond resolution, the precision kept
/// in canonical JSON.
pub fn now_ms() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.timestamp_millis_opt(now.timestamp_millis())
        .single()
        .unwrap_or(now)
}

fn default_version() -> u32 {
    1
}

/// A node in the organisation graph.
///
/// Composition instead of inheritance: base identity and temporal fields
/// live here, kind-specific fields live in the flattened [`EntityKind`], and
/// anything outside the declared schema goes in the explicit `extra` bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default = "now_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "now_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Monotone, starts at 1, bumped on every in-place update.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(flatten)]
    pub kind: EntityKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: ExtraBag,
}

impl Entity {
    /// Create an entity with a fresh UUID and current timestamps.
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        let now = now_ms();
        Entity {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            metadata: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            valid_from: None,
            valid_until: None,
            version: 1,
            kind,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    /// Check the base-field invariants: non-empty name, temporal ordering,
    /// positive version.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "name".into(),
                message: "Entity name must not be empty.".into(),
            });
        }
        if self.name.len() > crate::validation::MAX_NAME_LENGTH {
            return Err(CoreError::Validation {
                field: "name".into(),
                message: format!(
                    "Entity name exceeds {} characters ({} given).",
                    crate::validation::MAX_NAME_LENGTH,
                    self.name.len()
                ),
            });
        }
        if self.description.len() > crate::validation::MAX_DESCRIPTION_LENGTH {
            return Err(CoreError::Validation {
                field: "description".into(),
                message: format!(
                    "Entity description exceeds {} characters ({} given).",
                    crate::validation::MAX_DESCRIPTION_LENGTH,
                    self.description.len()
                ),
            });
        }
        crate::validation::validate_id_format(&self.id)?;
        if self.updated_at < self.created_at {
            return Err(CoreError::Temporal {
                message: format!(
                    "updated_at ({}) precedes created_at ({}) on entity '{}'",
                    self.updated_at, self.created_at, self.id
                ),
            });
        }
        if self.version == 0 {
            return Err(CoreError::Temporal {
                message: format!("version must be >= 1 on entity '{}'", self.id),
            });
        }
        Ok(())
    }

    /// Apply a sparse field patch, copy-validate-write style.
    ///
    /// The entity is serialised, the patch merged over the JSON object, and
    /// the result deserialised back through the full schema. `id`,
    /// `entity_type`, and the temporal bookkeeping fields cannot be patched.
    /// On success, `version` is bumped by exactly one and `updated_at`
    /// refreshed. The receiver is untouched on error.
    pub fn patched(&self, patch: &BTreeMap<String, serde_json::Value>) -> CoreResult<Entity> {
        const IMMUTABLE: &[&str] = &["id", "entity_type", "created_at", "updated_at", "version"];
        for key in patch.keys() {
            if IMMUTABLE.contains(&key.as_str()) {
                return Err(CoreError::Validation {
                    field: key.clone(),
                    message: "Field cannot be patched.".into(),
                });
            }
        }

        let mut value = serde_json::to_value(self).map_err(|e| {
            CoreError::Internal(format!("entity serialisation failed: {e}"))
        })?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| CoreError::Internal("entity is not a JSON object".into()))?;
        for (key, v) in patch {
            if !crate::types::kinds::catalog::is_declared(self.entity_type(), key) {
                return Err(CoreError::Validation {
                    field: key.clone(),
                    message: format!(
                        "Unknown field for entity_type '{}'.",
                        self.entity_type()
                    ),
                });
            }
            obj.insert(key.clone(), v.clone());
        }

        let mut updated: Entity = serde_json::from_value(value).map_err(|e| {
            CoreError::Validation {
                field: "patch".into(),
                message: format!("Patched entity failed schema validation: {e}"),
            }
        })?;
        updated.version = self.version + 1;
        updated.updated_at = now_ms();
        updated.validate()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::kinds::{Person, System};
    use crate::types::Severity;

    fn sample_person() -> Entity {
        Entity::new(
            "Dana Reyes",
            EntityKind::Person(Person {
                first_name: "Dana".into(),
                last_name: "Reyes".into(),
                email: "dana.reyes@example.com".into(),
                ..Person::default()
            }),
        )
    }

    #[test]
    fn new_entity_starts_at_version_one() {
        let e = sample_person();
        assert_eq!(e.version, 1);
        assert_eq!(e.created_at, e.updated_at);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn canonical_json_is_flat_and_tagged() {
        let e = sample_person();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["entity_type"], "person");
        assert_eq!(json["first_name"], "Dana");
        assert_eq!(json["name"], "Dana Reyes");
        // Flattened kind means no nested payload object.
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn entity_round_trips_through_json() {
        let e = sample_person();
        let json = serde_json::to_string(&e).unwrap();
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn patch_bumps_version_by_exactly_one() {
        let e = sample_person();
        let mut patch = BTreeMap::new();
        patch.insert("title".to_string(), serde_json::json!("Staff Engineer"));
        let updated = e.patched(&patch).unwrap();
        assert_eq!(updated.version, 2);
        assert!(updated.updated_at >= e.updated_at);
        match updated.kind {
            EntityKind::Person(ref p) => assert_eq!(p.title, "Staff Engineer"),
            _ => panic!("kind changed under patch"),
        }
    }

    #[test]
    fn patch_rejects_undeclared_and_immutable_fields() {
        let e = sample_person();
        let mut bogus = BTreeMap::new();
        bogus.insert("favorite_color".to_string(), serde_json::json!("teal"));
        assert!(e.patched(&bogus).is_err());

        let mut immutable = BTreeMap::new();
        immutable.insert("version".to_string(), serde_json::json!(99));
        assert!(e.patched(&immutable).is_err());
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut e = sample_person();
        e.name = "   ".into();
        assert!(e.validate().is_err());
    }

    #[test]
    fn system_version_field_does_not_collide_with_entity_version() {
        let e = Entity::new(
            "Email Server",
            EntityKind::System(System {
                software_version: "8.2.1".into(),
                criticality: Severity::Critical,
                ..System::default()
            }),
        );
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["software_version"], "8.2.1");
    }
}
