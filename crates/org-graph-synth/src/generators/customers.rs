//! L09: market segments and customers.

use org_graph_core::types::kinds::{Customer, MarketSegment};
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{
    COMPANY_SUFFIXES, CUSTOMER_INDUSTRIES, CUSTOMER_NAME_STEMS, MARKET_SEGMENTS,
};

pub fn generate_market_segments(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut segments = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (name, region) = if i < MARKET_SEGMENTS.len() {
            MARKET_SEGMENTS[i]
        } else {
            *ctx.choose(MARKET_SEGMENTS)
        };
        let size_estimate = ctx.draw_range(200, 50_000);
        let entity = ctx
            .entity(
                name,
                EntityKind::MarketSegment(MarketSegment {
                    segment_type: name.to_lowercase().replace(' ', "_"),
                    region: region.to_string(),
                    size_estimate,
                }),
            )
            .with_description(format!("{region} market segment for {name} accounts"))
            .with_tags(["segment"]);
        segments.push(entity);
    }
    segments
}

pub fn generate_customers(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut customers = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let stem = *ctx.choose(CUSTOMER_NAME_STEMS);
        let suffix = *ctx.choose(COMPANY_SUFFIXES);
        let industry = *ctx.choose(CUSTOMER_INDUSTRIES);
        let customer_type = *ctx.choose(&["enterprise", "mid_market", "smb"]);
        let annual_value = match customer_type {
            "enterprise" => ctx.rng_float(250_000.0, 5_000_000.0),
            "mid_market" => ctx.rng_float(50_000.0, 250_000.0),
            _ => ctx.rng_float(2_000.0, 50_000.0),
        };
        let is_active = ctx.chance(0.9);
        let entity = ctx
            .entity(
                format!("{stem} {suffix}"),
                EntityKind::Customer(Customer {
                    customer_type: customer_type.to_string(),
                    industry: industry.to_string(),
                    annual_value: Some((annual_value / 100.0).round() * 100.0),
                    is_active,
                }),
            )
            .with_description(format!(
                "{customer_type} customer in the {industry} industry"
            ))
            .with_tags([customer_type]);
        customers.push(entity);
    }
    customers
}
