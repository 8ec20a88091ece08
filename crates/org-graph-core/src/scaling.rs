//! Research-backed scaling model: employees → per-kind entity count ranges.
//!
//! Each industry carries a coefficient table (employees-per-entity). A
//! size-tier multiplier models organisational maturity: startups share
//! systems and have informal controls, large enterprises carry complex
//! hierarchies and regulatory burden.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::EntityType;

/// Industry-specific employees-per-entity ratios. Lower coefficient means
/// denser infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingCoefficients {
    pub systems: u32,
    pub vendors: u32,
    pub data_assets: u32,
    pub policies: u32,
    pub controls: u32,
    pub risks: u32,
    pub threats: u32,
    pub integrations: u32,
    pub data_domains: u32,
    pub data_flows: u32,
    pub org_units: u32,
    pub capabilities: u32,
    pub sites: u32,
    pub geographies: u32,
    pub jurisdictions: u32,
    pub product_portfolios: u32,
    pub products: u32,
    pub market_segments: u32,
    pub customers: u32,
    pub contracts: u32,
    pub initiatives: u32,
    pub threat_actors: u32,
    pub incidents: u32,
    pub regulations: u32,
}

pub const TECHNOLOGY: ScalingCoefficients = ScalingCoefficients {
    systems: 8,
    vendors: 40,
    data_assets: 15,
    policies: 100,
    controls: 50,
    risks: 80,
    threats: 200,
    integrations: 30,
    data_domains: 400,
    data_flows: 25,
    org_units: 150,
    capabilities: 100,
    sites: 500,
    geographies: 1000,
    jurisdictions: 1000,
    product_portfolios: 2000,
    products: 200,
    market_segments: 1000,
    customers: 100,
    contracts: 60,
    initiatives: 200,
    threat_actors: 250,
    incidents: 200,
    regulations: 300,
};

pub const FINANCIAL_SERVICES: ScalingCoefficients = ScalingCoefficients {
    systems: 12,
    vendors: 35,
    data_assets: 10,
    policies: 40,
    controls: 20,
    risks: 30,
    threats: 150,
    integrations: 40,
    data_domains: 300,
    data_flows: 20,
    org_units: 100,
    capabilities: 80,
    sites: 400,
    geographies: 800,
    jurisdictions: 600,
    product_portfolios: 1500,
    products: 150,
    market_segments: 800,
    customers: 50,
    contracts: 40,
    initiatives: 150,
    threat_actors: 200,
    incidents: 150,
    regulations: 200,
};

pub const HEALTHCARE: ScalingCoefficients = ScalingCoefficients {
    systems: 15,
    vendors: 50,
    data_assets: 5,
    policies: 50,
    controls: 25,
    risks: 40,
    threats: 200,
    integrations: 35,
    data_domains: 200,
    data_flows: 15,
    org_units: 120,
    capabilities: 100,
    sites: 300,
    geographies: 800,
    jurisdictions: 600,
    product_portfolios: 2000,
    products: 200,
    market_segments: 1000,
    customers: 80,
    contracts: 50,
    initiatives: 200,
    threat_actors: 300,
    incidents: 100,
    regulations: 250,
};

/// Coefficient table for an industry name; unknown industries fall back to
/// the technology defaults.
pub fn industry_coefficients(industry: &str) -> ScalingCoefficients {
    match industry {
        "technology" => TECHNOLOGY,
        "financial_services" => FINANCIAL_SERVICES,
        "healthcare" => HEALTHCARE,
        _ => TECHNOLOGY,
    }
}

/// Employees-per-site divisor used by the dynamic location-count formula.
pub fn employees_per_location(industry: &str) -> u32 {
    match industry {
        "financial_services" => 300,
        "healthcare" => 200,
        _ => 400,
    }
}

/// Organisational maturity multiplier by size tier.
pub fn size_tier_multiplier(employee_count: u32) -> f64 {
    if employee_count < 250 {
        0.7
    } else if employee_count < 2000 {
        1.0
    } else if employee_count < 10_000 {
        1.2
    } else {
        1.4
    }
}

/// Compute the `(low, high)` entity-count range scaled by industry
/// coefficient and size tier, clamped into `[floor, ceiling]`.
pub fn scaled_range(employee_count: u32, coefficient: u32, floor: u32, ceiling: u32) -> (u32, u32) {
    let tier = size_tier_multiplier(employee_count);
    let base = floor.max(((employee_count as f64 / coefficient as f64) * tier) as u32);
    let low = (ceiling - 1).min(floor.max((base as f64 * 0.8) as u32));
    let high = ceiling.min((low + 1).max((base as f64 * 1.2) as u32));
    (low, high)
}

/// Per-kind floor/ceiling clamps applied around the scaled range.
pub fn floor_ceiling(entity_type: EntityType) -> (u32, u32) {
    match entity_type {
        EntityType::System => (12, 400),
        EntityType::Vendor => (5, 120),
        EntityType::DataAsset => (8, 250),
        EntityType::Policy => (5, 60),
        EntityType::Control => (6, 100),
        EntityType::Risk => (4, 60),
        EntityType::Threat => (3, 30),
        EntityType::Integration => (5, 80),
        EntityType::DataDomain => (3, 15),
        EntityType::DataFlow => (6, 100),
        EntityType::OrganizationalUnit => (3, 25),
        EntityType::BusinessCapability => (6, 40),
        EntityType::Site => (2, 25),
        EntityType::Geography => (2, 12),
        EntityType::Jurisdiction => (2, 12),
        EntityType::ProductPortfolio => (2, 8),
        EntityType::Product => (4, 40),
        EntityType::MarketSegment => (2, 10),
        EntityType::Customer => (6, 80),
        EntityType::Contract => (5, 80),
        EntityType::Initiative => (3, 30),
        EntityType::ThreatActor => (3, 14),
        EntityType::Incident => (2, 30),
        EntityType::Regulation => (3, 15),
        // Derived kinds have no scaled range; callers never ask for one.
        _ => (0, u32::MAX),
    }
}

/// Coefficient for a scalable (non-derived) kind, if one exists.
pub fn coefficient_for(coeffs: &ScalingCoefficients, entity_type: EntityType) -> Option<u32> {
    let c = match entity_type {
        EntityType::System => coeffs.systems,
        EntityType::Vendor => coeffs.vendors,
        EntityType::DataAsset => coeffs.data_assets,
        EntityType::Policy => coeffs.policies,
        EntityType::Control => coeffs.controls,
        EntityType::Risk => coeffs.risks,
        EntityType::Threat => coeffs.threats,
        EntityType::Integration => coeffs.integrations,
        EntityType::DataDomain => coeffs.data_domains,
        EntityType::DataFlow => coeffs.data_flows,
        EntityType::OrganizationalUnit => coeffs.org_units,
        EntityType::BusinessCapability => coeffs.capabilities,
        EntityType::Site => coeffs.sites,
        EntityType::Geography => coeffs.geographies,
        EntityType::Jurisdiction => coeffs.jurisdictions,
        EntityType::ProductPortfolio => coeffs.product_portfolios,
        EntityType::Product => coeffs.products,
        EntityType::MarketSegment => coeffs.market_segments,
        EntityType::Customer => coeffs.customers,
        EntityType::Contract => coeffs.contracts,
        EntityType::Initiative => coeffs.initiatives,
        EntityType::ThreatActor => coeffs.threat_actors,
        EntityType::Incident => coeffs.incidents,
        EntityType::Regulation => coeffs.regulations,
        _ => return None,
    };
    Some(c)
}

/// Kinds whose counts are derived structurally (from the profile, from other
/// generated entities, or from the employee count) and therefore can never
/// be overridden. None of these carries a scaling coefficient.
pub const DERIVED_KINDS: &[EntityType] = &[
    EntityType::Department,
    EntityType::Role,
    EntityType::Network,
    EntityType::Vulnerability,
    EntityType::Person,
];

/// Resolve the final count for a scalable kind: draw uniformly from the
/// scaled range, then substitute any override (clamped to floor/ceiling).
/// Derived kinds have no scaled range and return `None`.
pub fn resolve_count(
    entity_type: EntityType,
    employee_count: u32,
    coeffs: &ScalingCoefficients,
    overrides: &BTreeMap<EntityType, u32>,
    draw: impl FnOnce(u32, u32) -> u32,
) -> Option<u32> {
    let coefficient = coefficient_for(coeffs, entity_type)?;
    let (floor, ceiling) = floor_ceiling(entity_type);
    let (low, high) = scaled_range(employee_count, coefficient, floor, ceiling);
    match overrides.get(&entity_type) {
        Some(&count) => Some(count.clamp(floor, ceiling)),
        None => Some(draw(low, high)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_exclusive_upper() {
        assert_eq!(size_tier_multiplier(249), 0.7);
        assert_eq!(size_tier_multiplier(250), 1.0);
        assert_eq!(size_tier_multiplier(1999), 1.0);
        assert_eq!(size_tier_multiplier(2000), 1.2);
        assert_eq!(size_tier_multiplier(9999), 1.2);
        assert_eq!(size_tier_multiplier(10_000), 1.4);
    }

    #[test]
    fn scaled_range_is_ordered_and_clamped() {
        for employees in [50u32, 100, 500, 2000, 14_000, 20_000] {
            for coeff in [8u32, 50, 200, 1000] {
                let (low, high) = scaled_range(employees, coeff, 3, 120);
                assert!(low < high, "low {low} !< high {high}");
                assert!(low >= 3 || low == 3);
                assert!(high <= 120);
            }
        }
    }

    #[test]
    fn scaled_range_matches_worked_example() {
        // 500 employees / coeff 8 * tier 1.0 = 62 → low 49, high 74.
        assert_eq!(scaled_range(500, 8, 8, 400), (49, 74));
        // Small org hits the floor.
        let (low, high) = scaled_range(40, 1000, 3, 60);
        assert_eq!(low, 3);
        assert_eq!(high, 4);
    }

    #[test]
    fn unknown_industry_falls_back_to_technology() {
        assert_eq!(industry_coefficients("retail"), TECHNOLOGY);
        assert_eq!(industry_coefficients("healthcare"), HEALTHCARE);
    }

    #[test]
    fn overrides_apply_only_to_non_derived_kinds() {
        let mut overrides = BTreeMap::new();
        overrides.insert(EntityType::System, 25u32);
        overrides.insert(EntityType::Vulnerability, 999u32);

        let count = resolve_count(
            EntityType::System,
            1000,
            &TECHNOLOGY,
            &overrides,
            |low, _| low,
        )
        .unwrap();
        assert_eq!(count, 25);

        // Vulnerability is derived; resolve_count has no coefficient for it.
        assert!(resolve_count(
            EntityType::Vulnerability,
            1000,
            &TECHNOLOGY,
            &overrides,
            |low, _| low,
        )
        .is_none());
    }

    #[test]
    fn overrides_are_clamped_to_floor_and_ceiling() {
        let mut overrides = BTreeMap::new();
        overrides.insert(EntityType::Regulation, 500u32);
        let count = resolve_count(
            EntityType::Regulation,
            1000,
            &TECHNOLOGY,
            &overrides,
            |low, _| low,
        )
        .unwrap();
        assert_eq!(count, 15); // ceiling for regulations
    }
}
