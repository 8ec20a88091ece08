//! L11: strategic initiatives.

use org_graph_core::types::kinds::Initiative;
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{FIRST_NAMES, INITIATIVE_STATUSES, INITIATIVE_TYPES, LAST_NAMES};

pub fn generate_initiatives(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut initiatives = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let initiative_type = *ctx.choose(INITIATIVE_TYPES);
        let status = *ctx.choose(INITIATIVE_STATUSES);
        let budget = (ctx.rng_float(100_000.0, 10_000_000.0) / 1000.0).round() * 1000.0;
        let start = ctx.date_between(2024, 2025);
        let target = ctx.date_between(2026, 2027);
        let first = *ctx.choose(FIRST_NAMES);
        let last = *ctx.choose(LAST_NAMES);
        let seq = ctx.next_sequence();
        let entity = ctx
            .entity(
                format!("{initiative_type} Initiative {seq:02}"),
                EntityKind::Initiative(Initiative {
                    initiative_type: initiative_type.to_string(),
                    status: status.to_string(),
                    budget: Some(budget),
                    start_date: Some(start),
                    target_date: Some(target),
                    sponsor: format!("{first} {last}"),
                }),
            )
            .with_description(format!(
                "{initiative_type} programme currently {}",
                status.to_lowercase()
            ))
            .with_tags([initiative_type.to_lowercase().replace(' ', "-")]);
        initiatives.push(entity);
    }
    initiatives
}
