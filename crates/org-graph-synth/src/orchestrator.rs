//! The generation orchestrator: resolves the count plan, runs the 12
//! generation layers in order, weaves relationships, populates mirror
//! fields, and assesses quality.

use tracing::{debug, info};

use org_graph_core::error::CoreResult;
use org_graph_core::scaling::{employees_per_location, floor_ceiling, resolve_count};
use org_graph_core::types::{Entity, EntityType};
use org_graph_engine::GraphEngine;

use crate::context::GenerationContext;
use crate::generators::{
    capabilities, compliance, customers, data, facilities, foundation, initiatives,
    organization, people, products, technology, vendors,
};
use crate::profiles::OrgProfile;
use crate::quality::{assess, QualityReport};
use crate::weaver::{populate_mirror_fields, RelationshipWeaver};

/// Counts per entity type for one generation run.
#[derive(Debug, Clone, Default)]
pub struct CountPlan {
    pub locations: u32,
    pub systems: u32,
    pub vulnerabilities: u32,
    pub persons: u32,
    pub scaled: Vec<(EntityType, u32)>,
}

impl CountPlan {
    fn scaled_count(&self, entity_type: EntityType) -> u32 {
        self.scaled
            .iter()
            .find(|(t, _)| *t == entity_type)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// Outcome of a full generation run.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub entity_count: usize,
    pub relationship_count: usize,
    pub quality: QualityReport,
}

/// Drives the full synthetic pipeline against an engine.
pub struct Orchestrator {
    context: GenerationContext,
}

impl Orchestrator {
    pub fn new(profile: OrgProfile, seed: u64) -> Self {
        Orchestrator {
            context: GenerationContext::new(profile, seed),
        }
    }

    /// Resolve every per-kind count up front: scaled ranges with override
    /// merge for the scalable kinds, structural formulas for the derived
    /// ones. Drawing everything first keeps the layer order strictly
    /// L00 → L11 even though the vulnerability count depends on the system
    /// count.
    fn plan_counts(&mut self) -> CountPlan {
        let profile = self.context.profile.clone();
        let coefficients = profile.coefficients();
        let mut plan = CountPlan::default();

        // Scalable kinds, in catalog order for RNG stability.
        for entity_type in EntityType::ALL {
            let count = resolve_count(
                entity_type,
                profile.employee_count,
                &coefficients,
                &profile.overrides,
                |low, high| self.context.draw_range(low, high),
            );
            if let Some(count) = count {
                plan.scaled.push((entity_type, count));
            }
        }

        // Locations: profile-specific dynamic formula.
        let (_, site_ceiling) = floor_ceiling(EntityType::Site);
        let per_location = employees_per_location(&profile.industry);
        plan.locations = 1.max(site_ceiling.min(profile.employee_count / per_location + 1));

        // Derived counts.
        plan.systems = plan.scaled_count(EntityType::System);
        plan.vulnerabilities = 1.max(
            (plan.systems as f64 * profile.vulnerability_probability) as u32,
        );
        plan.persons = people::person_count(profile.employee_count);
        debug!(?plan.locations, ?plan.systems, ?plan.vulnerabilities, ?plan.persons, "count plan resolved");
        plan
    }

    /// Run the pipeline: twelve generator layers in fixed order, then the
    /// weaver, mirror-field population, and the quality assessor.
    pub fn generate(mut self, engine: &mut dyn GraphEngine) -> CoreResult<GenerationOutcome> {
        let plan = self.plan_counts();
        let ctx = &mut self.context;

        // L00 Foundation
        emit(engine, ctx, EntityType::Location, |c| foundation::generate_locations(plan.locations, c))?;
        // L01 Compliance
        emit(engine, ctx, EntityType::Policy, |c| compliance::generate_policies(plan.scaled_count(EntityType::Policy), c))?;
        emit(engine, ctx, EntityType::Regulation, |c| compliance::generate_regulations(plan.scaled_count(EntityType::Regulation), c))?;
        emit(engine, ctx, EntityType::Control, |c| compliance::generate_controls(plan.scaled_count(EntityType::Control), c))?;
        emit(engine, ctx, EntityType::Risk, |c| compliance::generate_risks(plan.scaled_count(EntityType::Risk), c))?;
        emit(engine, ctx, EntityType::Threat, |c| compliance::generate_threats(plan.scaled_count(EntityType::Threat), c))?;
        emit(engine, ctx, EntityType::Vulnerability, |c| compliance::generate_vulnerabilities(plan.vulnerabilities, c))?;
        emit(engine, ctx, EntityType::ThreatActor, |c| compliance::generate_threat_actors(plan.scaled_count(EntityType::ThreatActor), c))?;
        emit(engine, ctx, EntityType::Incident, |c| compliance::generate_incidents(plan.scaled_count(EntityType::Incident), c))?;
        // L02 Technology
        emit(engine, ctx, EntityType::Network, technology::generate_networks)?;
        emit(engine, ctx, EntityType::System, |c| technology::generate_systems(plan.systems, c))?;
        emit(engine, ctx, EntityType::Integration, |c| technology::generate_integrations(plan.scaled_count(EntityType::Integration), c))?;
        // L03 Data
        emit(engine, ctx, EntityType::DataAsset, |c| data::generate_data_assets(plan.scaled_count(EntityType::DataAsset), c))?;
        emit(engine, ctx, EntityType::DataDomain, |c| data::generate_data_domains(plan.scaled_count(EntityType::DataDomain), c))?;
        emit(engine, ctx, EntityType::DataFlow, |c| data::generate_data_flows(plan.scaled_count(EntityType::DataFlow), c))?;
        // L04 Organization
        emit(engine, ctx, EntityType::Department, organization::generate_departments)?;
        emit(engine, ctx, EntityType::OrganizationalUnit, |c| organization::generate_org_units(plan.scaled_count(EntityType::OrganizationalUnit), c))?;
        // L05 People
        emit(engine, ctx, EntityType::Person, |c| people::generate_people(plan.persons, c))?;
        emit(engine, ctx, EntityType::Role, people::generate_roles)?;
        // L06 Capabilities
        emit(engine, ctx, EntityType::BusinessCapability, |c| capabilities::generate_capabilities(plan.scaled_count(EntityType::BusinessCapability), c))?;
        // L07 Locations & facilities
        emit(engine, ctx, EntityType::Site, |c| facilities::generate_sites(plan.scaled_count(EntityType::Site), c))?;
        emit(engine, ctx, EntityType::Geography, |c| facilities::generate_geographies(plan.scaled_count(EntityType::Geography), c))?;
        emit(engine, ctx, EntityType::Jurisdiction, |c| facilities::generate_jurisdictions(plan.scaled_count(EntityType::Jurisdiction), c))?;
        // L08 Products
        emit(engine, ctx, EntityType::ProductPortfolio, |c| products::generate_portfolios(plan.scaled_count(EntityType::ProductPortfolio), c))?;
        emit(engine, ctx, EntityType::Product, |c| products::generate_products(plan.scaled_count(EntityType::Product), c))?;
        // L09 Customers
        emit(engine, ctx, EntityType::MarketSegment, |c| customers::generate_market_segments(plan.scaled_count(EntityType::MarketSegment), c))?;
        emit(engine, ctx, EntityType::Customer, |c| customers::generate_customers(plan.scaled_count(EntityType::Customer), c))?;
        // L10 Vendors
        emit(engine, ctx, EntityType::Vendor, |c| vendors::generate_vendors(plan.scaled_count(EntityType::Vendor), c))?;
        emit(engine, ctx, EntityType::Contract, |c| vendors::generate_contracts(plan.scaled_count(EntityType::Contract), c))?;
        // L11 Initiatives
        emit(engine, ctx, EntityType::Initiative, |c| initiatives::generate_initiatives(plan.scaled_count(EntityType::Initiative), c))?;

        // Weave, then denormalise mirror fields through the engine.
        let relationships = RelationshipWeaver::new(ctx).weave_all();
        let relationship_count = relationships.len();
        engine.add_relationships_bulk(relationships)?;
        populate_mirror_fields(engine)?;

        let quality = assess(engine);
        let entity_count = engine.entity_count(None);
        info!(
            entities = entity_count,
            relationships = relationship_count,
            quality = quality.overall_score,
            "synthetic generation complete"
        );
        Ok(GenerationOutcome {
            entity_count,
            relationship_count,
            quality,
        })
    }
}

/// Run one generator, push its output through the engine, and record it in
/// the context pools for later layers.
fn emit<F>(
    engine: &mut dyn GraphEngine,
    ctx: &mut GenerationContext,
    entity_type: EntityType,
    generator: F,
) -> CoreResult<()>
where
    F: FnOnce(&mut GenerationContext) -> Vec<Entity>,
{
    let entities = generator(ctx);
    if entities.is_empty() {
        return Ok(());
    }
    engine.add_entities_bulk(entities.clone())?;
    debug!(kind = %entity_type, count = entities.len(), "layer emitted");
    ctx.store(entity_type, entities);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;
    use org_graph_engine::MemoryGraph;

    #[test]
    fn plan_reflects_overrides_for_scalable_kinds() {
        let mut profile = tech_company("Acme", 1000);
        profile.overrides.insert(EntityType::Customer, 12);
        let mut orchestrator = Orchestrator::new(profile, 5);
        let plan = orchestrator.plan_counts();
        assert_eq!(plan.scaled_count(EntityType::Customer), 12);
        assert!(plan.systems > 0);
        assert!(plan.vulnerabilities >= 1);
    }

    #[test]
    fn generation_populates_engine_and_scores_well() {
        let mut engine = MemoryGraph::new();
        let outcome = Orchestrator::new(tech_company("Acme", 200), 9)
            .generate(&mut engine)
            .unwrap();
        assert_eq!(outcome.entity_count, engine.entity_count(None));
        assert!(outcome.relationship_count > 0);
        assert!(outcome.quality.overall_score >= 0.9);
        let stats = engine.statistics();
        assert_eq!(stats.total_relationships, engine.relationship_count(None));
    }
}
