//! Relationship domain/range constraints.
//!
//! One static table declares the valid `(source kinds, target kinds)` pair
//! for every relationship type. The synthetic weaver, the write-path
//! validator, and the importer all consult this table; there is no second
//! copy anywhere.

use crate::error::{CoreError, CoreResult};
use crate::types::{EntityType, RelationshipType};

use EntityType as E;

/// Declared `(domain, range)` for a relationship type.
pub fn domain_range(rt: RelationshipType) -> (&'static [EntityType], &'static [EntityType]) {
    match rt {
        // --- Organizational ---
        RelationshipType::WorksIn => (&[E::Person], &[E::Department]),
        RelationshipType::Manages => (&[E::Person], &[E::Person, E::Department]),
        RelationshipType::ReportsTo => (&[E::Person], &[E::Person]),
        RelationshipType::HasRole => (&[E::Person], &[E::Role]),
        RelationshipType::MemberOf => (&[E::Person], &[E::Department, E::OrganizationalUnit]),
        // --- Technical ---
        RelationshipType::Hosts => (&[E::System, E::Network], &[E::System, E::DataAsset]),
        RelationshipType::ConnectsTo => (&[E::System], &[E::Network]),
        RelationshipType::DependsOn => (
            &[E::System, E::BusinessCapability, E::Integration, E::Role],
            &[E::System, E::Integration, E::BusinessCapability],
        ),
        RelationshipType::Stores => (&[E::System], &[E::DataAsset]),
        RelationshipType::RunsOn => (&[E::System], &[E::System]),
        // --- Security ---
        RelationshipType::Governs => (&[E::Policy], &[E::System, E::DataAsset, E::Department]),
        RelationshipType::Exploits => (&[E::ThreatActor], &[E::Vulnerability]),
        RelationshipType::Targets => (
            &[E::ThreatActor, E::Threat],
            &[E::System, E::Person, E::DataAsset],
        ),
        RelationshipType::Mitigates => (&[E::Control], &[E::Risk, E::Vulnerability, E::Threat]),
        RelationshipType::Affects => (
            &[E::Vulnerability, E::Incident],
            &[E::System, E::DataAsset],
        ),
        // --- Operational ---
        RelationshipType::ProvidesService => (
            &[E::System, E::Vendor],
            &[E::Department, E::OrganizationalUnit],
        ),
        RelationshipType::LocatedAt => (
            &[E::Person, E::System, E::Department, E::Site, E::Network],
            &[E::Location, E::Site, E::Geography],
        ),
        RelationshipType::SuppliedBy => (&[E::System], &[E::Vendor]),
        RelationshipType::ResponsibleFor => (
            &[E::Department, E::Person],
            &[E::System, E::DataAsset],
        ),
        // --- Geography ---
        RelationshipType::LocatedIn => (
            &[E::Geography, E::Site, E::Location, E::Network],
            &[E::Geography],
        ),
        RelationshipType::IsolatedFrom => (&[E::Geography], &[E::Geography]),
        RelationshipType::AcquiredFrom => (&[E::Geography, E::Site], &[E::Geography]),
        // --- Cross-layer ---
        RelationshipType::Supports => (
            &[E::System, E::BusinessCapability, E::Department, E::Integration],
            &[E::BusinessCapability, E::Product, E::Initiative, E::ProductPortfolio],
        ),
        RelationshipType::BelongsTo => (
            &[E::DataFlow, E::Product, E::System, E::Department],
            &[E::DataDomain, E::ProductPortfolio, E::OrganizationalUnit],
        ),
        RelationshipType::StaffedBy => (
            &[E::Department, E::OrganizationalUnit],
            &[E::Person],
        ),
        RelationshipType::HostedOn => (
            &[E::System, E::DataAsset, E::Network],
            &[E::System, E::Site],
        ),
        RelationshipType::Processes => (&[E::System], &[E::DataAsset, E::DataFlow]),
        RelationshipType::Delivers => (&[E::System, E::Vendor], &[E::Product, E::DataAsset]),
        RelationshipType::Serves => (
            &[E::Product, E::System, E::Department, E::OrganizationalUnit],
            &[E::Customer, E::MarketSegment],
        ),
        RelationshipType::ManagedBy => (
            &[
                E::System,
                E::Product,
                E::Contract,
                E::Integration,
                E::DataAsset,
                E::Network,
                E::DataDomain,
            ],
            &[E::Person, E::Department],
        ),
        RelationshipType::GovernedBy => (
            &[E::System, E::DataAsset, E::Product, E::Network, E::Integration],
            &[E::Policy, E::Regulation, E::Control],
        ),
        RelationshipType::ImpactedBy => (
            &[E::System, E::Product, E::BusinessCapability],
            &[E::Incident, E::Risk, E::Threat],
        ),
        // --- Compliance & governance ---
        RelationshipType::Regulates => (
            &[E::Regulation, E::Jurisdiction],
            &[E::System, E::DataAsset, E::Product, E::Vendor, E::Geography],
        ),
        RelationshipType::Implements => (
            &[E::Control, E::Policy],
            &[E::Regulation, E::Policy],
        ),
        RelationshipType::Enforces => (
            &[E::Control, E::Policy],
            &[E::Regulation, E::Risk, E::Policy],
        ),
        RelationshipType::CreatesRisk => (
            &[E::Threat, E::Vulnerability, E::Vendor],
            &[E::Risk],
        ),
        RelationshipType::Addresses => (
            &[E::Control, E::Initiative],
            &[E::Risk, E::Threat],
        ),
        RelationshipType::AuditedBy => (
            &[E::System, E::Vendor, E::Control],
            &[E::Person, E::Department],
        ),
        RelationshipType::SubjectTo => (
            &[
                E::System,
                E::Vendor,
                E::DataAsset,
                E::Product,
                E::Jurisdiction,
                E::Site,
                E::Regulation,
                E::Policy,
                E::Network,
                E::Integration,
                E::DataDomain,
                E::Customer,
                E::Department,
            ],
            &[E::Regulation, E::Jurisdiction, E::Policy, E::Control],
        ),
        RelationshipType::AppliesTo => (
            &[E::Control, E::Policy, E::Regulation],
            &[E::System, E::DataAsset, E::Department, E::Vendor],
        ),
        // --- Technology ---
        RelationshipType::IntegratesWith => (
            &[E::System, E::Integration],
            &[E::System],
        ),
        RelationshipType::AuthenticatesVia => (
            &[E::System, E::Person],
            &[E::System, E::Integration],
        ),
        RelationshipType::FeedsDataTo => (
            &[E::System, E::DataAsset],
            &[E::System, E::DataAsset],
        ),
        // --- Data ---
        RelationshipType::Contains => (
            &[E::DataDomain, E::System, E::MarketSegment, E::ProductPortfolio],
            &[E::DataAsset, E::DataFlow, E::Customer, E::Product],
        ),
        RelationshipType::FlowsTo => (
            &[E::DataFlow, E::DataAsset],
            &[E::System, E::DataAsset],
        ),
        RelationshipType::OriginatesFrom => (
            &[E::DataFlow, E::DataAsset],
            &[E::System, E::Vendor],
        ),
        RelationshipType::ClassifiedAs => (&[E::DataAsset], &[E::DataDomain]),
        // --- Capabilities ---
        RelationshipType::Enables => (
            &[E::System, E::Product],
            &[E::BusinessCapability],
        ),
        RelationshipType::RealizedBy => (
            &[E::BusinessCapability],
            &[E::System, E::Product, E::Person],
        ),
        // --- Commercial ---
        RelationshipType::Buys => (&[E::Customer], &[E::Product, E::ProductPortfolio]),
        RelationshipType::ContractsWith => (&[E::Contract], &[E::Vendor]),
        RelationshipType::Holds => (&[E::Customer, E::Vendor], &[E::Contract]),
        RelationshipType::Provides => (
            &[E::Vendor],
            &[E::System, E::Product, E::DataAsset],
        ),
        RelationshipType::Supplies => (&[E::Vendor], &[E::System, E::Product]),
        // --- Initiatives ---
        RelationshipType::Impacts => (
            &[E::Initiative],
            &[E::System, E::Product, E::BusinessCapability, E::Risk],
        ),
        RelationshipType::Drives => (
            &[E::Initiative],
            &[E::Product, E::BusinessCapability, E::Control],
        ),
        RelationshipType::FundedBy => (
            &[E::Initiative],
            &[E::Department, E::OrganizationalUnit],
        ),
    }
}

fn kinds_list(kinds: &[EntityType]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a `(source kind, target kind)` pair against the declared
/// domain × range of `rt`.
pub fn validate_relationship(
    rt: RelationshipType,
    source_kind: EntityType,
    target_kind: EntityType,
) -> CoreResult<()> {
    let (domain, range) = domain_range(rt);
    if !domain.contains(&source_kind) {
        return Err(CoreError::DomainRangeViolation {
            relationship_type: rt.as_str().into(),
            end: "source",
            kind: source_kind.as_str().into(),
            allowed: kinds_list(domain),
        });
    }
    if !range.contains(&target_kind) {
        return Err(CoreError::DomainRangeViolation {
            relationship_type: rt.as_str().into(),
            end: "target",
            kind: target_kind.as_str().into(),
            allowed: kinds_list(range),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RelationshipType as R;

    #[test]
    fn every_type_declares_nonempty_domain_and_range() {
        for rt in R::ALL {
            let (domain, range) = domain_range(rt);
            assert!(!domain.is_empty(), "{rt} has empty domain");
            assert!(!range.is_empty(), "{rt} has empty range");
        }
    }

    #[test]
    fn governs_requires_policy_source() {
        assert!(validate_relationship(R::Governs, E::Policy, E::System).is_ok());
        let err = validate_relationship(R::Governs, E::Person, E::System).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::SchemaViolation);
        assert!(err.to_string().contains("person"));
    }

    #[test]
    fn works_in_binds_person_to_department() {
        assert!(validate_relationship(R::WorksIn, E::Person, E::Department).is_ok());
        assert!(validate_relationship(R::WorksIn, E::Person, E::System).is_err());
        assert!(validate_relationship(R::WorksIn, E::System, E::Department).is_err());
    }

    #[test]
    fn mitigates_covers_risk_vulnerability_and_threat() {
        for target in [E::Risk, E::Vulnerability, E::Threat] {
            assert!(validate_relationship(R::Mitigates, E::Control, target).is_ok());
        }
        assert!(validate_relationship(R::Mitigates, E::Control, E::System).is_err());
    }

    #[test]
    fn subject_to_accepts_spec_examples() {
        for src in [E::System, E::Vendor, E::DataAsset, E::Product] {
            for tgt in [E::Regulation, E::Jurisdiction] {
                assert!(validate_relationship(R::SubjectTo, src, tgt).is_ok());
            }
        }
    }

    #[test]
    fn flows_to_accepts_flow_and_asset_sources() {
        assert!(validate_relationship(R::FlowsTo, E::DataFlow, E::System).is_ok());
        assert!(validate_relationship(R::FlowsTo, E::DataAsset, E::DataAsset).is_ok());
        assert!(validate_relationship(R::FlowsTo, E::System, E::System).is_err());
    }

    #[test]
    fn impacts_is_initiative_sourced() {
        for tgt in [E::System, E::Product, E::BusinessCapability, E::Risk] {
            assert!(validate_relationship(R::Impacts, E::Initiative, tgt).is_ok());
        }
        assert!(validate_relationship(R::Impacts, E::System, E::Risk).is_err());
    }
}
