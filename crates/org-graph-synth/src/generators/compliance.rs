//! L01 generators: policies, regulations, controls, risks, threats,
//! vulnerabilities, threat actors, incidents.
//!
//! Risk levels are never drawn independently: `inherent_risk_level` always
//! comes from the likelihood × impact matrix and the residual is the
//! inherent reduced by a mitigation delta, saturating at the bottom of the
//! scale.

use org_graph_core::risk::{risk_level, RiskLevel};
use org_graph_core::types::kinds::{
    Control, Incident, Policy, Regulation, Risk, Threat, ThreatActor, Vulnerability,
};
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{
    cvss_range, APT_PROFILES, CONTROL_DOMAINS, CONTROL_FRAMEWORKS, CONTROL_TYPES, INCIDENT_TYPES,
    POLICY_TEMPLATES, REGULATIONS, RISK_CATEGORIES, RISK_SCENARIOS, SEVERITIES,
    THREAT_CATEGORIES, TTPS, VULN_TEMPLATES,
};

pub fn generate_policies(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let org = ctx.profile.name.clone();
    let mut policies = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (name, policy_type) = if i < POLICY_TEMPLATES.len() {
            POLICY_TEMPLATES[i]
        } else {
            *ctx.choose(POLICY_TEMPLATES)
        };
        let owner = pick_person_name(ctx);
        let effective = ctx.date_between(2019, 2024);
        let entity = ctx
            .entity(
                name,
                EntityKind::Policy(Policy {
                    policy_type: policy_type.to_string(),
                    status: "active".to_string(),
                    effective_date: Some(effective),
                    review_cycle: "annual".to_string(),
                    owner,
                }),
            )
            .with_description(format!("{name} governing {policy_type} practices at {org}"))
            .with_tags([policy_type]);
        policies.push(entity);
    }
    policies
}

pub fn generate_regulations(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let picks = ctx.sample(REGULATIONS, count as usize);
    let selected: Vec<(&str, &str, &str, &str)> = picks.into_iter().copied().collect();
    let mut regulations = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let (short, full, jurisdiction, category) = if i < selected.len() {
            selected[i]
        } else {
            *ctx.choose(REGULATIONS)
        };
        let effective = ctx.date_between(2016, 2024);
        let entity = ctx
            .entity(
                full,
                EntityKind::Regulation(Regulation {
                    short_name: short.to_string(),
                    category: category.to_string(),
                    jurisdiction: jurisdiction.to_string(),
                    applicability_status: "Applicable".to_string(),
                    effective_date: Some(effective),
                }),
            )
            .with_description(format!("{short}: {category} regulation in {jurisdiction}"))
            .with_tags([
                category.to_lowercase().replace(' ', "-"),
                jurisdiction.to_lowercase(),
            ]);
        regulations.push(entity);
    }
    regulations
}

pub fn generate_controls(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut controls = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let framework = *ctx.choose(CONTROL_FRAMEWORKS);
        let domain = *ctx.choose(CONTROL_DOMAINS);
        let control_type = *ctx.choose(CONTROL_TYPES);
        let seq = ctx.next_sequence();
        let owner = pick_person_name(ctx);
        let implementation_status =
            (*ctx.choose(&["Implemented", "Partially Implemented", "Planned"])).to_string();
        let automation_level =
            (*ctx.choose(&["Fully Automated", "Semi-Automated", "Manual"])).to_string();
        let entity = ctx
            .entity(
                format!("CTL-{seq:05} {domain}"),
                EntityKind::Control(Control {
                    control_type: control_type.to_string(),
                    control_domain: domain.to_string(),
                    framework: framework.to_string(),
                    objective: format!("Ensure {} requirements are met", domain.to_lowercase()),
                    implementation_status,
                    automation_level,
                    owner,
                }),
            )
            .with_description(format!(
                "{control_type} control for {} under {framework}",
                domain.to_lowercase()
            ))
            .with_tags([
                framework.to_lowercase().replace(' ', "-"),
                domain.to_lowercase().replace(' ', "-"),
            ]);
        controls.push(entity);
    }
    controls
}

pub fn generate_risks(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut risks = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let category = *ctx.choose(RISK_CATEGORIES);
        let scenario = *ctx.choose(RISK_SCENARIOS);
        let likelihood = *ctx.choose(&RiskLevel::ALL);
        let impact = *ctx.choose(&RiskLevel::ALL);
        let inherent = risk_level(likelihood, impact);
        // Mitigation buys at most two levels; residual never exceeds inherent.
        let mitigation_delta = ctx.draw_range(0, 2) as u8;
        let residual = inherent.reduced_by(mitigation_delta);
        let owner = pick_person_name(ctx);
        let status = (*ctx.choose(&["Open", "Mitigated", "Accepted", "Transferred"])).to_string();
        let response =
            (*ctx.choose(&["Mitigate", "Accept", "Transfer", "Avoid"])).to_string();
        let seq = ctx.next_sequence();
        let entity = ctx
            .entity(
                format!("RSK-{seq:05} {category} Risk"),
                EntityKind::Risk(Risk {
                    category: category.to_string(),
                    likelihood,
                    impact,
                    inherent_risk_level: inherent,
                    residual_risk_level: residual,
                    owner,
                    status,
                    response_strategy: response,
                }),
            )
            .with_description(format!(
                "{category} risk: exposure to {scenario}"
            ))
            .with_tags([category.to_lowercase().replace(' ', "-")]);
        risks.push(entity);
    }
    risks
}

pub fn generate_threats(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut threats = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let category = *ctx.choose(THREAT_CATEGORIES);
        let threat_type =
            *ctx.choose(&["Targeted", "Opportunistic", "Environmental", "Systemic"]);
        let likelihood = *ctx.choose(&RiskLevel::ALL);
        let impact = *ctx.choose(&RiskLevel::ALL);
        let source = *ctx.choose(&["External", "Internal", "Environmental", "Partner"]);
        let status = *ctx.choose(&["Active", "Emerging", "Historical", "Mitigated"]);
        let seq = ctx.next_sequence();
        let entity = ctx
            .entity(
                format!("THR-{seq:05} {category} Threat"),
                EntityKind::Threat(Threat {
                    category: category.to_string(),
                    threat_type: threat_type.to_string(),
                    likelihood: Some(likelihood),
                    impact_if_realized: Some(impact),
                    threat_source: source.to_string(),
                    status: status.to_string(),
                }),
            )
            .with_description(format!(
                "{threat_type} {} threat from {} origin",
                category.to_lowercase(),
                source.to_lowercase()
            ))
            .with_tags([category.to_lowercase().replace(' ', "-")]);
        threats.push(entity);
    }
    threats
}

pub fn generate_vulnerabilities(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut vulns = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let severity = *ctx.choose(SEVERITIES);
        let (cvss_low, cvss_high) = cvss_range(severity);
        let cvss_score =
            (ctx.rng_float(cvss_low, cvss_high) * 10.0).round() / 10.0;
        let template = ctx.choose(VULN_TEMPLATES);
        let name = template.name;
        let description = *ctx.choose(template.descriptions);
        let component = *ctx.choose(template.components);

        // Patch availability skews status toward closure.
        let patch_available = ctx.chance(0.6);
        let status = if patch_available {
            *ctx.choose(&["mitigated", "resolved", "open"])
        } else {
            *ctx.choose(&["open", "accepted", "open"])
        };

        let year = ctx.draw_range(2020, 2025);
        let number = ctx.draw_range(10_000, 99_999);
        let discovery = ctx.date_between(2023, 2025);
        let exploit_available = ctx.chance(0.3);
        let entity = ctx
            .entity(
                name,
                EntityKind::Vulnerability(Vulnerability {
                    cve_id: format!("CVE-{year}-{number}"),
                    cvss_score,
                    severity,
                    status: status.to_string(),
                    exploit_available,
                    patch_available,
                    affected_component: component.to_string(),
                    discovery_date: Some(discovery),
                    affected_system_ids: Vec::new(),
                }),
            )
            .with_description(description)
            .with_tags([severity.as_str()]);
        vulns.push(entity);
    }
    vulns
}

pub fn generate_threat_actors(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut actors = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let entity = if i < APT_PROFILES.len() {
            // Named actors carry hard-coded attribution.
            let profile = &APT_PROFILES[i];
            let ttp_count = ctx.draw_range(2, 5) as usize;
            let ttps: Vec<String> = ctx
                .sample(TTPS, ttp_count)
                .into_iter()
                .map(|t| t.to_string())
                .collect();
            let first_seen = ctx.date_between(2015, 2021);
            let last_seen = ctx.date_between(2024, 2025);
            ctx.entity(
                profile.name,
                EntityKind::ThreatActor(ThreatActor {
                    actor_type: profile.actor_type.to_string(),
                    sophistication: profile.sophistication.to_string(),
                    motivation: profile.motivation.to_string(),
                    origin_country: profile.origin.to_string(),
                    first_seen: Some(first_seen),
                    last_seen: Some(last_seen),
                    aliases: Vec::new(),
                    ttps,
                    target_industries: profile.targets.iter().map(|t| t.to_string()).collect(),
                }),
            )
            .with_description(format!(
                "{} threat actor attributed to {}, motivated by {}",
                profile.actor_type.replace('_', " "),
                profile.origin,
                profile.motivation
            ))
            .with_tags([profile.actor_type])
        } else {
            let actor_type = *ctx.choose(&["cybercriminal", "hacktivist", "insider"]);
            let motivation =
                *ctx.choose(&["financial", "disruption", "ideological", "retaliation"]);
            let sophistication = *ctx.choose(&["low", "medium", "high"]);
            let origin = *ctx.choose(&["Unknown", "RU", "CN", "IR", "KP"]);
            let suffix = ctx.draw_range(10, 99);
            let ttp_count = ctx.draw_range(2, 4) as usize;
            let ttps: Vec<String> = ctx
                .sample(TTPS, ttp_count)
                .into_iter()
                .map(|t| t.to_string())
                .collect();
            let industry_count = ctx.draw_range(1, 3) as usize;
            let industries: Vec<String> = ctx
                .sample(
                    &["technology", "healthcare", "finance", "government", "energy"],
                    industry_count,
                )
                .into_iter()
                .map(|t| t.to_string())
                .collect();
            let first_seen = ctx.date_between(2018, 2023);
            let last_seen = ctx.date_between(2024, 2025);
            ctx.entity(
                format!("APT-{suffix}"),
                EntityKind::ThreatActor(ThreatActor {
                    actor_type: actor_type.to_string(),
                    sophistication: sophistication.to_string(),
                    motivation: motivation.to_string(),
                    origin_country: origin.to_string(),
                    first_seen: Some(first_seen),
                    last_seen: Some(last_seen),
                    aliases: Vec::new(),
                    ttps,
                    target_industries: industries,
                }),
            )
            .with_description(format!(
                "{actor_type} group operating at {sophistication} sophistication"
            ))
            .with_tags([actor_type])
        };
        actors.push(entity);
    }
    actors
}

pub fn generate_incidents(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut incidents = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let incident_type = *ctx.choose(INCIDENT_TYPES);
        let severity = *ctx.choose(SEVERITIES);
        let resolved = ctx.chance(0.7);
        let detected = ctx.date_between(2024, 2025);
        let seq = ctx.next_sequence();
        let resolved_at = if resolved {
            Some(ctx.date_between(2024, 2025))
        } else {
            None
        };
        let root_cause = if resolved {
            (*ctx.choose(&[
                "credential reuse on an exposed service",
                "missed patch window on a perimeter host",
                "misconfigured storage bucket permissions",
                "malicious attachment opened by staff",
            ]))
            .to_string()
        } else {
            String::new()
        };
        let entity = ctx
            .entity(
                format!("INC-{seq:05} {}", incident_type.replace('_', " ")),
                EntityKind::Incident(Incident {
                    incident_type: incident_type.to_string(),
                    severity,
                    status: if resolved { "resolved" } else { "investigating" }.to_string(),
                    detected_at: Some(detected),
                    resolved_at,
                    root_cause,
                }),
            )
            .with_description(format!(
                "{} incident handled by the security operations team",
                incident_type.replace('_', " ")
            ))
            .with_tags([severity.as_str()]);
        incidents.push(entity);
    }
    incidents
}

/// Draw a person-style name without depending on the people layer, which
/// runs later. Owners referenced here are strings, not graph edges.
fn pick_person_name(ctx: &mut GenerationContext) -> String {
    let first = *ctx.choose(crate::templates::FIRST_NAMES);
    let last = *ctx.choose(crate::templates::LAST_NAMES);
    format!("{first} {last}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;
    use org_graph_core::risk::RISK_MATRIX;

    #[test]
    fn risk_levels_obey_the_matrix() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 42);
        for entity in generate_risks(25, &mut ctx) {
            let EntityKind::Risk(r) = &entity.kind else {
                panic!("wrong kind");
            };
            assert_eq!(
                r.inherent_risk_level,
                RISK_MATRIX[r.likelihood as usize][r.impact as usize]
            );
            assert!(r.residual_risk_level <= r.inherent_risk_level);
        }
    }

    #[test]
    fn cvss_scores_match_severity_bands() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 7);
        for entity in generate_vulnerabilities(40, &mut ctx) {
            let EntityKind::Vulnerability(v) = &entity.kind else {
                panic!("wrong kind");
            };
            let (low, high) = cvss_range(v.severity);
            assert!(
                v.cvss_score >= low - 0.05 && v.cvss_score <= high + 0.05,
                "{} outside band for {:?}",
                v.cvss_score,
                v.severity
            );
        }
    }

    #[test]
    fn first_twelve_actors_are_the_named_apts() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 1);
        let actors = generate_threat_actors(14, &mut ctx);
        assert_eq!(actors[0].name, "Midnight Blizzard");
        assert_eq!(actors[11].name, "Charming Kitten");
        assert!(actors[12].name.starts_with("APT-"));
    }

    #[test]
    fn descriptions_carry_no_lorem_ipsum() {
        let mut ctx = GenerationContext::new(tech_company("T", 500), 3);
        let mut all = generate_policies(10, &mut ctx);
        all.extend(generate_risks(10, &mut ctx));
        all.extend(generate_incidents(10, &mut ctx));
        for entity in all {
            let lower = entity.description.to_lowercase();
            for marker in ["lorem", "ipsum", "dolor", "sit amet", "consectetur"] {
                assert!(!lower.contains(marker), "lorem marker in '{lower}'");
            }
        }
    }
}
