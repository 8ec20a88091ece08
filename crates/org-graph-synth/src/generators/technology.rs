//! L02: networks, systems, integrations.

use org_graph_core::types::kinds::{Integration, Network, System};
use org_graph_core::types::{Entity, EntityKind, Severity};

use crate::context::GenerationContext;
use crate::templates::{
    DATA_FORMATS, ENVIRONMENTS, INTEGRATION_PROTOCOLS, INTEGRATION_TYPES, OVERFLOW_STACKS,
    OVERFLOW_SYSTEMS, SYSTEM_TEMPLATES,
};

pub fn generate_networks(ctx: &mut GenerationContext) -> Vec<Entity> {
    let specs = ctx.profile.network_specs.clone();
    let mut networks = Vec::with_capacity(specs.len());
    for spec in specs {
        let base_ip = spec.cidr.split('/').next().unwrap_or("10.0.0.0");
        let gateway = match base_ip.rsplit_once('.') {
            Some((prefix, _)) => format!("{prefix}.1"),
            None => base_ip.to_string(),
        };
        let vlan_id = ctx.draw_range(10, 4094);
        let dns_servers = vec![private_ip(ctx), private_ip(ctx)];
        let entity = ctx
            .entity(
                spec.name.clone(),
                EntityKind::Network(Network {
                    cidr: spec.cidr.clone(),
                    zone: spec.zone.clone(),
                    vlan_id,
                    gateway,
                    dns_servers,
                    is_monitored: spec.zone != "guest",
                    location_id: None,
                }),
            )
            .with_description(format!("{} network segment ({} zone)", spec.name, spec.zone))
            .with_tags([spec.zone.as_str()]);
        networks.push(entity);
    }
    networks
}

pub fn generate_systems(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut systems = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (name, system_type, os, stack, ports, criticality) = if i < SYSTEM_TEMPLATES.len() {
            let template = &SYSTEM_TEMPLATES[i];
            (
                template.name.to_string(),
                template.system_type,
                (*ctx.choose(template.os)).to_string(),
                ctx.choose(template.stacks).to_vec(),
                template.ports.to_vec(),
                template.criticality,
            )
        } else {
            let (system_type, names) = ctx.choose(OVERFLOW_SYSTEMS);
            let name = (*ctx.choose(names)).to_string();
            let os = match *system_type {
                "appliance" => *ctx.choose(&["Linux", "Ubuntu 22.04", "RHEL 9"]),
                "saas" => "Linux",
                _ => *ctx.choose(&["Linux", "Ubuntu 22.04", "RHEL 9", "Windows Server 2022"]),
            };
            // Appliances carry firmware stacks, never web frameworks.
            let stack: Vec<&str> = if *system_type == "appliance" {
                vec!["firmware", "linux"]
            } else {
                ctx.choose(OVERFLOW_STACKS).to_vec()
            };
            let port_pool = [22u16, 80, 443, 3306, 5432, 8080, 8443];
            let port_count = ctx.draw_range(1, 3) as usize;
            let ports: Vec<u16> = ctx
                .sample(&port_pool, port_count)
                .into_iter()
                .copied()
                .collect();
            let criticality = *ctx.choose(&[
                Severity::Low,
                Severity::Medium,
                Severity::High,
                Severity::Critical,
            ]);
            (name, *system_type, os.to_string(), stack, ports, criticality)
        };

        let hostname = format!(
            "{}-{i:03}",
            name.to_lowercase().replace([' ', '/'], "-")
        );
        let ip_address = private_ip(ctx);
        let environment = (*ctx.choose(ENVIRONMENTS)).to_string();
        let is_internet_facing = ctx.chance(0.2);
        let major = ctx.draw_range(1, 12);
        let minor = ctx.draw_range(0, 9);
        let patch_level = ctx.draw_range(0, 20);
        let description = format!("{name}, a {system_type} workload running {os}");
        let entity = ctx
            .entity(
                name,
                EntityKind::System(System {
                    system_type: system_type.to_string(),
                    hostname,
                    ip_address,
                    os,
                    software_version: format!("{major}.{minor}.{patch_level}"),
                    environment,
                    criticality,
                    is_internet_facing,
                    ports,
                    technologies: stack.iter().map(|s| s.to_string()).collect(),
                    network_id: None,
                    department_id: None,
                }),
            )
            .with_description(description)
            .with_tags([system_type]);
        systems.push(entity);
    }
    systems
}

pub fn generate_integrations(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut integrations = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let integration_type = *ctx.choose(INTEGRATION_TYPES);
        let protocol = *ctx.choose(INTEGRATION_PROTOCOLS);
        let data_format = *ctx.choose(DATA_FORMATS);
        let frequency = *ctx.choose(&["Real-time", "Near Real-time", "Hourly", "Daily"]);
        let direction = *ctx.choose(&["Unidirectional", "Bidirectional"]);
        let status = *ctx.choose(&["Active", "Inactive", "Deprecated", "Under Development"]);
        let criticality = *ctx.choose(&[
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]);
        let seq = ctx.next_sequence();
        let entity = ctx
            .entity(
                format!("INT-{seq:05} {integration_type} over {protocol}"),
                EntityKind::Integration(Integration {
                    integration_type: integration_type.to_string(),
                    protocol: protocol.to_string(),
                    data_format: data_format.to_string(),
                    frequency: frequency.to_string(),
                    direction: direction.to_string(),
                    status: status.to_string(),
                    criticality,
                }),
            )
            .with_description(format!(
                "{integration_type} integration exchanging {data_format} via {protocol}"
            ))
            .with_tags([integration_type.to_lowercase().replace(' ', "-")]);
        integrations.push(entity);
    }
    integrations
}

fn private_ip(ctx: &mut GenerationContext) -> String {
    format!(
        "10.{}.{}.{}",
        ctx.draw_range(0, 255),
        ctx.draw_range(0, 255),
        ctx.draw_range(2, 254)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;

    #[test]
    fn networks_come_from_profile_specs() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        let networks = generate_networks(&mut ctx);
        assert_eq!(networks.len(), 4);
        let EntityKind::Network(n) = &networks[0].kind else {
            panic!("wrong kind");
        };
        assert_eq!(n.cidr, "10.0.0.0/16");
        assert_eq!(n.gateway, "10.0.0.1");
        assert!(n.is_monitored);
        // Guest network is unmonitored.
        let EntityKind::Network(guest) = &networks[3].kind else {
            panic!("wrong kind");
        };
        assert!(!guest.is_monitored);
    }

    #[test]
    fn templated_systems_keep_coordinated_bundles() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        let systems = generate_systems(5, &mut ctx);
        let EntityKind::System(erp) = &systems[0].kind else {
            panic!("wrong kind");
        };
        assert_eq!(systems[0].name, "ERP System");
        assert_eq!(erp.criticality, Severity::Critical);
        assert!(erp.ports.contains(&443));
        assert!(!erp.technologies.is_empty());
    }

    #[test]
    fn overflow_appliances_never_carry_web_frameworks() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 11);
        let systems = generate_systems(60, &mut ctx);
        let web = ["django", "rails", "react", "express", "spring", "flask"];
        for entity in systems.iter().skip(SYSTEM_TEMPLATES.len()) {
            let EntityKind::System(s) = &entity.kind else {
                continue;
            };
            if s.system_type == "appliance" {
                for tech in &s.technologies {
                    assert!(!web.contains(&tech.as_str()), "appliance with {tech}");
                }
            }
        }
    }
}
