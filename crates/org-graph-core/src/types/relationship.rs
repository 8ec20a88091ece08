//! Relationship edges and the closed relationship-type catalog.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::entity::now_ms;

/// Closed catalog of relationship types. Domain/range constraints live in
/// [`crate::schema`], one table shared by the weaver, the write validator,
/// and the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    // Organizational
    WorksIn,
    Manages,
    ReportsTo,
    HasRole,
    MemberOf,
    // Technical
    Hosts,
    ConnectsTo,
    DependsOn,
    Stores,
    RunsOn,
    // Security
    Governs,
    Exploits,
    Targets,
    Mitigates,
    Affects,
    // Operational
    ProvidesService,
    LocatedAt,
    SuppliedBy,
    ResponsibleFor,
    // Geography
    LocatedIn,
    IsolatedFrom,
    AcquiredFrom,
    // Cross-layer
    Supports,
    BelongsTo,
    StaffedBy,
    HostedOn,
    Processes,
    Delivers,
    Serves,
    ManagedBy,
    GovernedBy,
    ImpactedBy,
    // Compliance & governance
    Regulates,
    Implements,
    Enforces,
    CreatesRisk,
    Addresses,
    AuditedBy,
    SubjectTo,
    AppliesTo,
    // Technology
    IntegratesWith,
    AuthenticatesVia,
    FeedsDataTo,
    // Data
    Contains,
    FlowsTo,
    OriginatesFrom,
    ClassifiedAs,
    // Capabilities
    Enables,
    RealizedBy,
    // Commercial
    Buys,
    ContractsWith,
    Holds,
    Provides,
    Supplies,
    // Initiatives
    Impacts,
    Drives,
    FundedBy,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 57] = [
        RelationshipType::WorksIn,
        RelationshipType::Manages,
        RelationshipType::ReportsTo,
        RelationshipType::HasRole,
        RelationshipType::MemberOf,
        RelationshipType::Hosts,
        RelationshipType::ConnectsTo,
        RelationshipType::DependsOn,
        RelationshipType::Stores,
        RelationshipType::RunsOn,
        RelationshipType::Governs,
        RelationshipType::Exploits,
        RelationshipType::Targets,
        RelationshipType::Mitigates,
        RelationshipType::Affects,
        RelationshipType::ProvidesService,
        RelationshipType::LocatedAt,
        RelationshipType::SuppliedBy,
        RelationshipType::ResponsibleFor,
        RelationshipType::LocatedIn,
        RelationshipType::IsolatedFrom,
        RelationshipType::AcquiredFrom,
        RelationshipType::Supports,
        RelationshipType::BelongsTo,
        RelationshipType::StaffedBy,
        RelationshipType::HostedOn,
        RelationshipType::Processes,
        RelationshipType::Delivers,
        RelationshipType::Serves,
        RelationshipType::ManagedBy,
        RelationshipType::GovernedBy,
        RelationshipType::ImpactedBy,
        RelationshipType::Regulates,
        RelationshipType::Implements,
        RelationshipType::Enforces,
        RelationshipType::CreatesRisk,
        RelationshipType::Addresses,
        RelationshipType::AuditedBy,
        RelationshipType::SubjectTo,
        RelationshipType::AppliesTo,
        RelationshipType::IntegratesWith,
        RelationshipType::AuthenticatesVia,
        RelationshipType::FeedsDataTo,
        RelationshipType::Contains,
        RelationshipType::FlowsTo,
        RelationshipType::OriginatesFrom,
        RelationshipType::ClassifiedAs,
        RelationshipType::Enables,
        RelationshipType::RealizedBy,
        RelationshipType::Buys,
        RelationshipType::ContractsWith,
        RelationshipType::Holds,
        RelationshipType::Provides,
        RelationshipType::Supplies,
        RelationshipType::Impacts,
        RelationshipType::Drives,
        RelationshipType::FundedBy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipType::WorksIn => "works_in",
            RelationshipType::Manages => "manages",
            RelationshipType::ReportsTo => "reports_to",
            RelationshipType::HasRole => "has_role",
            RelationshipType::MemberOf => "member_of",
            RelationshipType::Hosts => "hosts",
            RelationshipType::ConnectsTo => "connects_to",
            RelationshipType::DependsOn => "depends_on",
            RelationshipType::Stores => "stores",
            RelationshipType::RunsOn => "runs_on",
            RelationshipType::Governs => "governs",
            RelationshipType::Exploits => "exploits",
            RelationshipType::Targets => "targets",
            RelationshipType::Mitigates => "mitigates",
            RelationshipType::Affects => "affects",
            RelationshipType::ProvidesService => "provides_service",
            RelationshipType::LocatedAt => "located_at",
            RelationshipType::SuppliedBy => "supplied_by",
            RelationshipType::ResponsibleFor => "responsible_for",
            RelationshipType::LocatedIn => "located_in",
            RelationshipType::IsolatedFrom => "isolated_from",
            RelationshipType::AcquiredFrom => "acquired_from",
            RelationshipType::Supports => "supports",
            RelationshipType::BelongsTo => "belongs_to",
            RelationshipType::StaffedBy => "staffed_by",
            RelationshipType::HostedOn => "hosted_on",
            RelationshipType::Processes => "processes",
            RelationshipType::Delivers => "delivers",
            RelationshipType::Serves => "serves",
            RelationshipType::ManagedBy => "managed_by",
            RelationshipType::GovernedBy => "governed_by",
            RelationshipType::ImpactedBy => "impacted_by",
            RelationshipType::Regulates => "regulates",
            RelationshipType::Implements => "implements",
            RelationshipType::Enforces => "enforces",
            RelationshipType::CreatesRisk => "creates_risk",
            RelationshipType::Addresses => "addresses",
            RelationshipType::AuditedBy => "audited_by",
            RelationshipType::SubjectTo => "subject_to",
            RelationshipType::AppliesTo => "applies_to",
            RelationshipType::IntegratesWith => "integrates_with",
            RelationshipType::AuthenticatesVia => "authenticates_via",
            RelationshipType::FeedsDataTo => "feeds_data_to",
            RelationshipType::Contains => "contains",
            RelationshipType::FlowsTo => "flows_to",
            RelationshipType::OriginatesFrom => "originates_from",
            RelationshipType::ClassifiedAs => "classified_as",
            RelationshipType::Enables => "enables",
            RelationshipType::RealizedBy => "realized_by",
            RelationshipType::Buys => "buys",
            RelationshipType::ContractsWith => "contracts_with",
            RelationshipType::Holds => "holds",
            RelationshipType::Provides => "provides",
            RelationshipType::Supplies => "supplies",
            RelationshipType::Impacts => "impacts",
            RelationshipType::Drives => "drives",
            RelationshipType::FundedBy => "funded_by",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationshipType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown relationship_type '{s}'."))
    }
}

/// Round to two decimal places, the resolution kept for edge metadata.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Clamp into `[0, 1]` and round to two decimals.
pub fn clamp_round2(x: f64) -> f64 {
    round2(x.clamp(0.0, 1.0))
}

/// A directed edge between two entities. The graph is a multigraph: several
/// relationships may share the same `(source_id, target_id, type)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub relationship_type: RelationshipType,
    pub source_id: String,
    pub target_id: String,
    #[serde(default = "default_unit")]
    pub weight: f64,
    #[serde(default = "default_unit")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default = "now_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "now_ms")]
    pub updated_at: DateTime<Utc>,
}

fn default_unit() -> f64 {
    1.0
}

impl Relationship {
    /// Create a relationship with a fresh UUID, current timestamps, and
    /// unit weight/confidence.
    pub fn new(
        relationship_type: RelationshipType,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        let now = now_ms();
        Relationship {
            id: Uuid::new_v4().to_string(),
            relationship_type,
            source_id: source_id.into(),
            target_id: target_id.into(),
            weight: 1.0,
            confidence: 1.0,
            properties: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set weight, clamping to `[0, 1]` and rounding to two decimals.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = clamp_round2(weight);
        self
    }

    /// Set confidence, clamping to `[0, 1]` and rounding to two decimals.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_round2(confidence);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Write-path validation: id format, metadata range, temporal ordering.
    /// Out-of-range weight/confidence is rejected here, not clamped.
    pub fn validate(&self) -> CoreResult<()> {
        crate::validation::validate_id_format(&self.id)?;
        crate::validation::validate_id_format(&self.source_id)?;
        crate::validation::validate_id_format(&self.target_id)?;
        for (field, value) in [("weight", self.weight), ("confidence", self.confidence)] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(CoreError::Validation {
                    field: field.into(),
                    message: format!("{field} must be within [0.0, 1.0], got {value}"),
                });
            }
        }
        if self.updated_at < self.created_at {
            return Err(CoreError::Temporal {
                message: format!(
                    "updated_at precedes created_at on relationship '{}'",
                    self.id
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_57_types_with_unique_names() {
        let mut names: Vec<&str> = RelationshipType::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 57);
    }

    #[test]
    fn relationship_type_round_trips_through_str() {
        for t in RelationshipType::ALL {
            let parsed: RelationshipType = t.as_str().parse().unwrap();
            assert_eq!(parsed, t);
        }
    }

    #[test]
    fn weight_and_confidence_are_clamped_and_rounded() {
        let rel = Relationship::new(RelationshipType::DependsOn, "a", "b")
            .with_weight(0.8349)
            .with_confidence(1.7);
        assert_eq!(rel.weight, 0.83);
        assert_eq!(rel.confidence, 1.0);
        assert!(rel.validate().is_ok());
    }

    #[test]
    fn out_of_range_weight_is_rejected_on_write_path() {
        let mut rel = Relationship::new(RelationshipType::DependsOn, "a", "b");
        rel.weight = 1.2;
        assert!(rel.validate().is_err());
        rel.weight = f64::NAN;
        assert!(rel.validate().is_err());
    }

    #[test]
    fn relationship_round_trips_through_json() {
        let rel = Relationship::new(RelationshipType::FlowsTo, "src-1", "tgt-2")
            .with_weight(0.75)
            .with_property("dependency_type", serde_json::json!("data"));
        let json = serde_json::to_string(&rel).unwrap();
        let back: Relationship = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rel);
        assert!(json.contains("\"relationship_type\":\"flows_to\""));
    }
}
