//! L07: sites, geographies, jurisdictions.
//!
//! Data-center sites always carry the restricted physical-security tier.

use org_graph_core::types::kinds::{Geography, Jurisdiction, Site};
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{CITIES, GEOGRAPHIES, JURISDICTIONS, SITE_TYPES};

pub fn generate_sites(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut sites = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let site_type = if i < SITE_TYPES.len() {
            SITE_TYPES[i]
        } else {
            *ctx.choose(SITE_TYPES)
        };
        let city = *ctx.choose(CITIES);
        let physical_security_tier = if site_type == "Data Center" {
            "restricted"
        } else {
            *ctx.choose(&["standard", "enhanced", "restricted"])
        };
        let capacity = ctx.draw_range(20, 3000);
        let entity = ctx
            .entity(
                format!("{city} {site_type}"),
                EntityKind::Site(Site {
                    site_type: site_type.to_string(),
                    physical_security_tier: physical_security_tier.to_string(),
                    capacity,
                    city: city.to_string(),
                    country: String::new(),
                    operational_status: "Active".to_string(),
                }),
            )
            .with_description(format!("{site_type} facility operating out of {city}"))
            .with_tags([site_type.to_lowercase().replace(' ', "-")]);
        sites.push(entity);
    }
    sites
}

pub fn generate_geographies(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut geographies = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (name, countries, regime) = if i < GEOGRAPHIES.len() {
            GEOGRAPHIES[i]
        } else {
            *ctx.choose(GEOGRAPHIES)
        };
        let entity = ctx
            .entity(
                name,
                EntityKind::Geography(Geography {
                    region: name.to_string(),
                    country_codes: countries.iter().map(|c| c.to_string()).collect(),
                    regulatory_regime: regime.to_string(),
                }),
            )
            .with_description(format!("Operating region {name} under {regime}"))
            .with_tags(["geography"]);
        geographies.push(entity);
    }
    geographies
}

pub fn generate_jurisdictions(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut jurisdictions = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (code, legal_system, residency) = if i < JURISDICTIONS.len() {
            JURISDICTIONS[i]
        } else {
            *ctx.choose(JURISDICTIONS)
        };
        let entity = ctx
            .entity(
                format!("Jurisdiction {code}"),
                EntityKind::Jurisdiction(Jurisdiction {
                    jurisdiction_code: code.to_string(),
                    legal_system: legal_system.to_string(),
                    data_residency_required: residency,
                }),
            )
            .with_description(format!(
                "{code} jurisdiction under {} rules",
                legal_system.replace('_', " ")
            ))
            .with_tags(["jurisdiction"]);
        jurisdictions.push(entity);
    }
    jurisdictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;

    #[test]
    fn data_center_sites_have_restricted_tier() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        for site in generate_sites(12, &mut ctx) {
            let EntityKind::Site(s) = &site.kind else {
                panic!("wrong kind");
            };
            if s.site_type == "Data Center" {
                assert_eq!(s.physical_security_tier, "restricted");
            }
        }
    }
}
