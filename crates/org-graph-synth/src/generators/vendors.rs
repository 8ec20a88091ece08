//! L10: vendors and contracts.

use org_graph_core::types::kinds::{Contract, Vendor};
use org_graph_core::types::{Entity, EntityKind, Severity};

use crate::context::GenerationContext;
use crate::templates::{CONTRACT_TYPES, VENDOR_TEMPLATES};

pub fn generate_vendors(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut vendors = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (name, category) = if i < VENDOR_TEMPLATES.len() {
            VENDOR_TEMPLATES[i]
        } else {
            *ctx.choose(VENDOR_TEMPLATES)
        };
        let criticality = *ctx.choose(&[
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]);
        let risk_rating = *ctx.choose(&["low", "moderate", "elevated", "high"]);
        let is_active = ctx.chance(0.95);
        let entity = ctx
            .entity(
                name,
                EntityKind::Vendor(Vendor {
                    category: category.to_string(),
                    criticality,
                    risk_rating: risk_rating.to_string(),
                    is_active,
                }),
            )
            .with_description(format!("{name}, a {category} vendor"))
            .with_tags([category]);
        vendors.push(entity);
    }
    vendors
}

pub fn generate_contracts(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut contracts = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let contract_type = *ctx.choose(CONTRACT_TYPES);
        let start = ctx.date_between(2021, 2024);
        let end = ctx.date_between(2025, 2028);
        let annual_value = (ctx.rng_float(10_000.0, 2_000_000.0) / 100.0).round() * 100.0;
        let seq = ctx.next_sequence();
        let auto_renew = ctx.chance(0.6);
        let entity = ctx
            .entity(
                format!("CTR-{seq:05} {contract_type}"),
                EntityKind::Contract(Contract {
                    contract_type: contract_type.to_string(),
                    start_date: Some(start),
                    end_date: Some(end),
                    annual_value: Some(annual_value),
                    auto_renew,
                    status: "active".to_string(),
                }),
            )
            .with_description(format!(
                "{contract_type} agreement renewing through the current term"
            ))
            .with_tags([contract_type.to_lowercase().replace(' ', "-")]);
        contracts.push(entity);
    }
    contracts
}
