//! L06: business capabilities.

use org_graph_core::types::kinds::BusinessCapability;
use org_graph_core::types::{Entity, EntityKind, Severity};

use crate::context::GenerationContext;
use crate::templates::{CAPABILITY_NAMES, FIRST_NAMES, LAST_NAMES};

pub fn generate_capabilities(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let picks = ctx.sample(CAPABILITY_NAMES, count as usize);
    let selected: Vec<&str> = picks.into_iter().copied().collect();
    let mut capabilities = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let name = if i < selected.len() {
            selected[i]
        } else {
            *ctx.choose(CAPABILITY_NAMES)
        };
        let maturity = *ctx.choose(&["Initial", "Managed", "Defined", "Optimized"]);
        let criticality = *ctx.choose(&[
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]);
        let first = *ctx.choose(FIRST_NAMES);
        let last = *ctx.choose(LAST_NAMES);
        let entity = ctx
            .entity(
                name,
                EntityKind::BusinessCapability(BusinessCapability {
                    maturity: maturity.to_string(),
                    criticality,
                    owner: format!("{first} {last}"),
                }),
            )
            .with_description(format!(
                "{name} capability at {} maturity",
                maturity.to_lowercase()
            ))
            .with_tags(["capability"]);
        capabilities.push(entity);
    }
    capabilities
}
