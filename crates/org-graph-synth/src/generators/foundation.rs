//! L00: physical locations.

use org_graph_core::types::kinds::Location;
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{location_profile, CITIES, LOCATION_TYPES};

pub fn generate_locations(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut locations = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let location_type = if i < LOCATION_TYPES.len() {
            LOCATION_TYPES[i]
        } else {
            *ctx.choose(LOCATION_TYPES)
        };
        let (security_levels, capacity_range) = location_profile(location_type);
        let city = *ctx.choose(CITIES);
        let type_label = location_type.replace('_', " ");
        let capacity = ctx.draw_range(capacity_range.0, capacity_range.1);
        let security_level = (*ctx.choose(security_levels)).to_string();
        let street_number = ctx.draw_range(10, 990);

        let entity = ctx
            .entity(
                format!("{city} {}", title_case(&type_label)),
                EntityKind::Location(Location {
                    address: format!("{street_number} Market Street"),
                    city: city.to_string(),
                    country: String::new(),
                    location_type: location_type.to_string(),
                    capacity,
                    is_primary: i == 0,
                    security_level,
                    has_physical_security: location_type != "remote_hub",
                }),
            )
            .with_description(format!("{} facility in {city}", title_case(&type_label)))
            .with_tags([location_type]);
        locations.push(entity);
    }
    locations
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;
    use org_graph_core::types::EntityKind;

    #[test]
    fn first_location_is_primary_headquarters() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        let locations = generate_locations(3, &mut ctx);
        assert_eq!(locations.len(), 3);
        match &locations[0].kind {
            EntityKind::Location(l) => {
                assert!(l.is_primary);
                assert_eq!(l.location_type, "headquarters");
            }
            _ => panic!("wrong kind"),
        }
    }

    #[test]
    fn data_center_security_is_restricted() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        let locations = generate_locations(5, &mut ctx);
        for loc in &locations {
            if let EntityKind::Location(l) = &loc.kind {
                if l.location_type == "data_center" {
                    assert_eq!(l.security_level, "restricted");
                }
            }
        }
    }
}
