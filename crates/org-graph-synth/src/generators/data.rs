//! L03: data assets, data domains, data flows.
//!
//! Correlated fields: restricted and confidential flows are always
//! encrypted in transit; PII assets never classify as public.

use org_graph_core::types::kinds::{DataAsset, DataDomain, DataFlow};
use org_graph_core::types::{DataClassification, Entity, EntityKind, EntityType};

use crate::context::GenerationContext;
use crate::templates::{
    DATA_ASSET_TEMPLATES, DATA_DOMAIN_NAMES, FLOW_FREQUENCIES, TRANSFER_METHODS,
};

const CLASSIFICATIONS: &[DataClassification] = &[
    DataClassification::Public,
    DataClassification::Internal,
    DataClassification::Confidential,
    DataClassification::Restricted,
];

pub fn generate_data_assets(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut assets = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (name, asset_type, contains_pii) = if i < DATA_ASSET_TEMPLATES.len() {
            DATA_ASSET_TEMPLATES[i]
        } else {
            *ctx.choose(DATA_ASSET_TEMPLATES)
        };
        let classification = if contains_pii {
            *ctx.choose(&[DataClassification::Confidential, DataClassification::Restricted])
        } else {
            *ctx.choose(CLASSIFICATIONS)
        };
        let record_count = ctx.draw_range(1_000, 5_000_000);
        let retention =
            (*ctx.choose(&["1y", "3y", "7y", "indefinite"])).to_string();
        let entity = ctx
            .entity(
                name,
                EntityKind::DataAsset(DataAsset {
                    asset_type: asset_type.to_string(),
                    classification,
                    record_count,
                    contains_pii,
                    retention_period: retention,
                    system_id: None,
                }),
            )
            .with_description(format!(
                "{name}: {asset_type} holding {} records",
                record_count
            ))
            .with_tags([classification.as_str()]);
        assets.push(entity);
    }
    assets
}

pub fn generate_data_domains(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let picks = ctx.sample(DATA_DOMAIN_NAMES, count as usize);
    let selected: Vec<&str> = picks.into_iter().copied().collect();
    let mut domains = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let name = if i < selected.len() {
            selected[i]
        } else {
            *ctx.choose(DATA_DOMAIN_NAMES)
        };
        let owner = pick_name(ctx);
        let steward = pick_name(ctx);
        let classification = *ctx.choose(CLASSIFICATIONS);
        let governance =
            *ctx.choose(&["Governed", "Partially Governed", "Ungoverned"]);
        let entity = ctx
            .entity(
                name,
                EntityKind::DataDomain(DataDomain {
                    domain_owner: owner,
                    data_steward: steward,
                    classification_level: Some(classification),
                    governance_status: governance.to_string(),
                }),
            )
            .with_description(format!("Enterprise data domain covering {name}"))
            .with_tags(["data-domain"]);
        domains.push(entity);
    }
    domains
}

pub fn generate_data_flows(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let system_names: Vec<String> = ctx
        .entities(EntityType::System)
        .iter()
        .map(|s| s.name.clone())
        .collect();
    let mut flows = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let source = if system_names.is_empty() {
            "External Source".to_string()
        } else {
            ctx.choose(&system_names).clone()
        };
        let target = if system_names.is_empty() {
            "External Target".to_string()
        } else {
            ctx.choose(&system_names).clone()
        };
        let classification = *ctx.choose(CLASSIFICATIONS);
        // Sensitive traffic is always encrypted; the rest usually is.
        let encryption_in_transit = classification.requires_encryption() || ctx.chance(0.7);
        let transfer = *ctx.choose(TRANSFER_METHODS);
        let frequency = *ctx.choose(FLOW_FREQUENCIES);
        let status = *ctx.choose(&["Active", "Inactive", "Under Review"]);
        let entity = ctx
            .entity(
                format!("Flow: {source} to {target}"),
                EntityKind::DataFlow(DataFlow {
                    classification,
                    transfer_method: transfer.to_string(),
                    frequency: frequency.to_string(),
                    encryption_in_transit,
                    status: status.to_string(),
                }),
            )
            .with_description(format!(
                "{frequency} {} feed from {source} to {target}",
                transfer.to_lowercase()
            ))
            .with_tags([classification.as_str()]);
        flows.push(entity);
    }
    flows
}

fn pick_name(ctx: &mut GenerationContext) -> String {
    let first = *ctx.choose(crate::templates::FIRST_NAMES);
    let last = *ctx.choose(crate::templates::LAST_NAMES);
    format!("{first} {last}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;

    #[test]
    fn sensitive_flows_are_always_encrypted() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        for entity in generate_data_flows(50, &mut ctx) {
            let EntityKind::DataFlow(f) = &entity.kind else {
                panic!("wrong kind");
            };
            if f.classification.requires_encryption() {
                assert!(f.encryption_in_transit, "{:?} flow unencrypted", f.classification);
            }
        }
    }

    #[test]
    fn pii_assets_are_never_public() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 9);
        for entity in generate_data_assets(40, &mut ctx) {
            let EntityKind::DataAsset(a) = &entity.kind else {
                panic!("wrong kind");
            };
            if a.contains_pii {
                assert!(a.classification.requires_encryption());
            }
        }
    }
}
