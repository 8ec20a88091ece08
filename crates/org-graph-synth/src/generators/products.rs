//! L08: product portfolios and products.

use org_graph_core::types::kinds::{Product, ProductPortfolio};
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{FIRST_NAMES, LAST_NAMES, PORTFOLIO_NAMES, PRODUCT_NAMES};

pub fn generate_portfolios(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut portfolios = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let name = if i < PORTFOLIO_NAMES.len() {
            PORTFOLIO_NAMES[i]
        } else {
            *ctx.choose(PORTFOLIO_NAMES)
        };
        let first = *ctx.choose(FIRST_NAMES);
        let last = *ctx.choose(LAST_NAMES);
        let stage = *ctx.choose(&["Invest", "Sustain", "Harvest"]);
        let entity = ctx
            .entity(
                name,
                EntityKind::ProductPortfolio(ProductPortfolio {
                    portfolio_owner: format!("{first} {last}"),
                    lifecycle_stage: stage.to_string(),
                }),
            )
            .with_description(format!("{name} portfolio in the {stage} stage"))
            .with_tags(["portfolio"]);
        portfolios.push(entity);
    }
    portfolios
}

pub fn generate_products(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let picks = ctx.sample(PRODUCT_NAMES, count as usize);
    let selected: Vec<&str> = picks.into_iter().copied().collect();
    let mut products = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let name = if i < selected.len() {
            selected[i]
        } else {
            *ctx.choose(PRODUCT_NAMES)
        };
        let product_type = *ctx.choose(&["platform", "application", "service", "api"]);
        let stage = *ctx.choose(&["Development", "Growth", "Mature", "Sunset"]);
        let launch = ctx.date_between(2016, 2024);
        let is_revenue_generating = stage != "Development" && ctx.chance(0.8);
        let entity = ctx
            .entity(
                name,
                EntityKind::Product(Product {
                    product_type: product_type.to_string(),
                    lifecycle_stage: stage.to_string(),
                    launch_date: Some(launch),
                    is_revenue_generating,
                }),
            )
            .with_description(format!(
                "{name}, a {product_type} offering in its {} phase",
                stage.to_lowercase()
            ))
            .with_tags([product_type]);
        products.push(entity);
    }
    products
}
