//! Relationship weaver: runs once after all generator layers complete and
//! knits the generated entities into an organisation.
//!
//! Every edge goes through one helper that enforces the metadata contract:
//! severity-derived weights follow the fixed `{low 0.3, medium 0.5,
//! high 0.8, critical 1.0}` table, other non-fact weights are drawn in
//! `[0.5, 1.0]`, confidence comes from a per-category band, and
//! `properties` is never empty. Weight 1.0 is reserved for pure
//! organisational facts.

use std::collections::{BTreeMap, HashMap};

use serde_json::{json, Value};
use tracing::info;

use org_graph_core::error::CoreResult;
use org_graph_core::types::{
    Direction, EntityKind, EntityType, Relationship, RelationshipType, Severity,
};
use org_graph_engine::GraphEngine;

use crate::context::GenerationContext;

/// Confidence band for organisational facts recorded directly from the
/// generator's own assignments.
const CONF_ORG_FACT: (f64, f64) = (0.90, 0.95);
/// Confidence band for inferred dependencies.
const CONF_DEPENDENCY: (f64, f64) = (0.80, 0.90);
/// Confidence band for threat attribution.
const CONF_THREAT: (f64, f64) = (0.70, 0.75);

/// Weaves all relationship types for the entities in the context.
pub struct RelationshipWeaver<'a> {
    ctx: &'a mut GenerationContext,
    /// leaf department id → assigned person ids, filled by
    /// `people_to_departments` and reused by the management chain and role
    /// assignment passes. Ordered map: iteration order must be stable so a
    /// fixed seed reproduces the graph exactly.
    dept_members: BTreeMap<String, Vec<String>>,
}

impl<'a> RelationshipWeaver<'a> {
    pub fn new(ctx: &'a mut GenerationContext) -> Self {
        RelationshipWeaver {
            ctx,
            dept_members: BTreeMap::new(),
        }
    }

    /// Run every weave pass. Order matters only where noted: departments
    /// before management chains and roles.
    pub fn weave_all(&mut self) -> Vec<Relationship> {
        let mut rels = Vec::new();
        // Organisational structure
        self.people_to_departments(&mut rels);
        self.management_chains(&mut rels);
        self.people_to_roles(&mut rels);
        self.people_to_locations(&mut rels);
        self.people_to_org_units(&mut rels);
        // Technology fabric
        self.systems_to_networks(&mut rels);
        self.system_dependencies(&mut rels);
        self.systems_to_departments(&mut rels);
        self.systems_authenticate_via_sso(&mut rels);
        self.systems_feed_data(&mut rels);
        self.integrations_to_systems(&mut rels);
        // Data layer
        self.data_to_systems(&mut rels);
        self.assets_to_domains(&mut rels);
        self.flows_to_systems(&mut rels);
        self.flows_to_domains(&mut rels);
        // Governance
        self.policies_to_assets(&mut rels);
        self.controls_to_regulations(&mut rels);
        self.controls_to_risks(&mut rels);
        self.controls_to_vulnerabilities(&mut rels);
        self.threats_to_risks(&mut rels);
        self.subject_to_regulations(&mut rels);
        // Security
        self.vulnerabilities_to_systems(&mut rels);
        self.actors_to_vulnerabilities(&mut rels);
        self.actors_to_targets(&mut rels);
        self.incidents_to_systems(&mut rels);
        // Facilities
        self.departments_to_locations(&mut rels);
        self.networks_to_locations(&mut rels);
        self.sites_to_geographies(&mut rels);
        // Commercial
        self.vendors_to_systems(&mut rels);
        self.vendors_provide_products(&mut rels);
        self.contracts_to_vendors(&mut rels);
        self.customers_to_contracts(&mut rels);
        self.customers_to_products(&mut rels);
        self.products_to_portfolios(&mut rels);
        self.products_to_segments(&mut rels);
        // Capabilities & initiatives
        self.systems_to_capabilities(&mut rels);
        self.capabilities_realized_by_systems(&mut rels);
        self.initiatives_impact(&mut rels);
        self.initiatives_funded(&mut rels);
        self.initiatives_address_risks(&mut rels);
        info!(relationships = rels.len(), "weave complete");
        rels
    }

    /// Single construction point for every woven edge.
    fn edge(
        &mut self,
        rt: RelationshipType,
        source: &str,
        target: &str,
        weight: f64,
        confidence_band: (f64, f64),
        properties: Vec<(&str, Value)>,
    ) -> Relationship {
        debug_assert!(!properties.is_empty(), "woven edges carry typed context");
        let mut rel = Relationship::new(rt, source, target);
        rel.id = self.ctx.next_id();
        let confidence = self
            .ctx
            .rng_float(confidence_band.0, confidence_band.1);
        rel = rel.with_weight(weight).with_confidence(confidence);
        for (key, value) in properties {
            rel.properties.insert(key.to_string(), value);
        }
        rel
    }

    /// Non-fact weight with variance.
    fn drawn_weight(&mut self) -> f64 {
        self.ctx.rng_float(0.5, 1.0)
    }

    // --- Organisational structure -----------------------------------------

    /// Leaf departments with their headcounts.
    fn leaf_departments(&self) -> Vec<(String, u32)> {
        let pool = self.ctx.entities(EntityType::Department);
        let parent_ids: std::collections::HashSet<&str> = pool
            .iter()
            .filter_map(|d| match &d.kind {
                EntityKind::Department(dept) => dept.parent_department_id.as_deref(),
                _ => None,
            })
            .collect();
        pool.iter()
            .filter(|d| !parent_ids.contains(d.id.as_str()))
            .map(|d| {
                let headcount = match &d.kind {
                    EntityKind::Department(dept) => dept.headcount,
                    _ => 0,
                };
                (d.id.clone(), headcount)
            })
            .collect()
    }

    /// Headcount-proportional assignment with largest-remainder rounding.
    fn people_to_departments(&mut self, rels: &mut Vec<Relationship>) {
        let people = self.ctx.ids(EntityType::Person);
        let leaves = self.leaf_departments();
        if people.is_empty() || leaves.is_empty() {
            return;
        }
        let total_headcount: u32 = leaves.iter().map(|(_, h)| *h).sum::<u32>().max(1);
        let n = people.len();

        // Largest-remainder quotas per leaf department.
        let mut quotas: Vec<(usize, usize, f64)> = leaves
            .iter()
            .enumerate()
            .map(|(i, (_, headcount))| {
                let exact = n as f64 * *headcount as f64 / total_headcount as f64;
                (i, exact as usize, exact - (exact as usize) as f64)
            })
            .collect();
        let assigned: usize = quotas.iter().map(|(_, q, _)| q).sum();
        let mut remainder = n.saturating_sub(assigned);
        quotas.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        for quota in quotas.iter_mut() {
            if remainder == 0 {
                break;
            }
            quota.1 += 1;
            remainder -= 1;
        }
        quotas.sort_by_key(|(i, _, _)| *i);

        let mut cursor = 0usize;
        for (leaf_index, quota, _) in quotas {
            let dept_id = leaves[leaf_index].0.clone();
            for person_id in people.iter().skip(cursor).take(quota) {
                let rel = self.edge(
                    RelationshipType::WorksIn,
                    person_id,
                    &dept_id,
                    1.0,
                    CONF_ORG_FACT,
                    vec![("assignment", json!("primary"))],
                );
                rels.push(rel);
                self.dept_members
                    .entry(dept_id.clone())
                    .or_default()
                    .push(person_id.clone());
            }
            cursor += quota;
        }
    }

    /// First member of each department manages it; the rest report to them.
    fn management_chains(&mut self, rels: &mut Vec<Relationship>) {
        let memberships: Vec<(String, Vec<String>)> = self
            .dept_members
            .iter()
            .map(|(d, m)| (d.clone(), m.clone()))
            .collect();
        for (dept_id, members) in memberships {
            if members.len() < 2 {
                continue;
            }
            let manager = &members[0];
            let rel = self.edge(
                RelationshipType::Manages,
                manager,
                &dept_id,
                1.0,
                CONF_ORG_FACT,
                vec![("chain", json!("department_head"))],
            );
            rels.push(rel);
            for report in &members[1..] {
                let rel = self.edge(
                    RelationshipType::ReportsTo,
                    report,
                    manager,
                    1.0,
                    CONF_ORG_FACT,
                    vec![("chain", json!("direct"))],
                );
                rels.push(rel);
            }
        }
    }

    /// Each person holds one role drawn from their department's roles.
    fn people_to_roles(&mut self, rels: &mut Vec<Relationship>) {
        let mut roles_by_dept: HashMap<String, Vec<String>> = HashMap::new();
        for role in self.ctx.entities(EntityType::Role) {
            if let EntityKind::Role(r) = &role.kind {
                if let Some(dept) = &r.department_id {
                    roles_by_dept
                        .entry(dept.clone())
                        .or_default()
                        .push(role.id.clone());
                }
            }
        }
        let memberships: Vec<(String, Vec<String>)> = self
            .dept_members
            .iter()
            .map(|(d, m)| (d.clone(), m.clone()))
            .collect();
        for (dept_id, members) in memberships {
            let Some(role_ids) = roles_by_dept.get(&dept_id).cloned() else {
                continue;
            };
            if role_ids.is_empty() {
                continue;
            }
            for person_id in members {
                let role_id = self.ctx.choose(&role_ids).clone();
                let rel = self.edge(
                    RelationshipType::HasRole,
                    &person_id,
                    &role_id,
                    1.0,
                    CONF_ORG_FACT,
                    vec![("assignment", json!("primary"))],
                );
                rels.push(rel);
            }
        }
    }

    fn people_to_locations(&mut self, rels: &mut Vec<Relationship>) {
        let people = self.ctx.ids(EntityType::Person);
        let locations = self.ctx.ids(EntityType::Location);
        if locations.is_empty() {
            return;
        }
        for person_id in people {
            let location_id = self.ctx.choose(&locations).clone();
            let rel = self.edge(
                RelationshipType::LocatedAt,
                &person_id,
                &location_id,
                1.0,
                CONF_ORG_FACT,
                vec![("basis", json!("badge_records"))],
            );
            rels.push(rel);
        }
    }

    /// A sample of people sit in formal organisational units.
    fn people_to_org_units(&mut self, rels: &mut Vec<Relationship>) {
        let people = self.ctx.ids(EntityType::Person);
        let units = self.ctx.ids(EntityType::OrganizationalUnit);
        if units.is_empty() || people.is_empty() {
            return;
        }
        let sample_size = (people.len() / 10).clamp(1, 40);
        let chosen: Vec<String> = self
            .ctx
            .sample(&people, sample_size)
            .into_iter()
            .cloned()
            .collect();
        for person_id in chosen {
            let unit_id = self.ctx.choose(&units).clone();
            let rel = self.edge(
                RelationshipType::MemberOf,
                &person_id,
                &unit_id,
                1.0,
                CONF_ORG_FACT,
                vec![("membership", json!("formal"))],
            );
            rels.push(rel);
        }
    }

    // --- Technology fabric -------------------------------------------------

    fn systems_to_networks(&mut self, rels: &mut Vec<Relationship>) {
        let systems = self.ctx.ids(EntityType::System);
        let networks = self.ctx.ids(EntityType::Network);
        if networks.is_empty() {
            return;
        }
        for system_id in systems {
            let network_id = self.ctx.choose(&networks).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::ConnectsTo,
                &system_id,
                &network_id,
                weight,
                CONF_DEPENDENCY,
                vec![("attachment", json!("primary_segment"))],
            );
            rels.push(rel);
        }
    }

    fn system_dependencies(&mut self, rels: &mut Vec<Relationship>) {
        let systems = self.ctx.ids(EntityType::System);
        if systems.len() < 2 {
            return;
        }
        let count = (systems.len() / 3).min(20).max(1);
        for _ in 0..count {
            let pair: Vec<String> = self.ctx.sample(&systems, 2).into_iter().cloned().collect();
            if pair.len() < 2 {
                break;
            }
            let dependency_type =
                *self
                    .ctx
                    .choose(&["runtime", "build", "data", "auth", "monitoring"]);
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::DependsOn,
                &pair[0],
                &pair[1],
                weight,
                CONF_DEPENDENCY,
                vec![("dependency_type", json!(dependency_type))],
            );
            rels.push(rel);
        }
    }

    fn systems_to_departments(&mut self, rels: &mut Vec<Relationship>) {
        let systems = self.ctx.ids(EntityType::System);
        let departments: Vec<String> =
            self.leaf_departments().into_iter().map(|(id, _)| id).collect();
        if departments.is_empty() {
            return;
        }
        for system_id in systems {
            let dept_id = self.ctx.choose(&departments).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::ResponsibleFor,
                &dept_id,
                &system_id,
                weight,
                CONF_DEPENDENCY,
                vec![("ownership", json!("operational"))],
            );
            rels.push(rel);
        }
    }

    /// Non-SSO systems authenticate through the SSO provider when one exists.
    fn systems_authenticate_via_sso(&mut self, rels: &mut Vec<Relationship>) {
        let sso_id = self
            .ctx
            .entities(EntityType::System)
            .iter()
            .find(|s| s.name == "SSO Provider")
            .map(|s| s.id.clone());
        let Some(sso_id) = sso_id else { return };
        let systems: Vec<String> = self
            .ctx
            .entities(EntityType::System)
            .iter()
            .filter(|s| s.id != sso_id)
            .map(|s| s.id.clone())
            .collect();
        let sample_size = (systems.len() * 2 / 3).max(1);
        let chosen: Vec<String> = self
            .ctx
            .sample(&systems, sample_size)
            .into_iter()
            .cloned()
            .collect();
        for system_id in chosen {
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::AuthenticatesVia,
                &system_id,
                &sso_id,
                weight,
                CONF_DEPENDENCY,
                vec![("dependency_type", json!("auth"))],
            );
            rels.push(rel);
        }
    }

    fn systems_feed_data(&mut self, rels: &mut Vec<Relationship>) {
        let systems = self.ctx.ids(EntityType::System);
        if systems.len() < 2 {
            return;
        }
        let count = (systems.len() / 4).max(1);
        for _ in 0..count {
            let pair: Vec<String> = self.ctx.sample(&systems, 2).into_iter().cloned().collect();
            if pair.len() < 2 {
                break;
            }
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::FeedsDataTo,
                &pair[0],
                &pair[1],
                weight,
                CONF_DEPENDENCY,
                vec![("dependency_type", json!("data"))],
            );
            rels.push(rel);
        }
    }

    fn integrations_to_systems(&mut self, rels: &mut Vec<Relationship>) {
        let integrations = self.ctx.ids(EntityType::Integration);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for integration_id in integrations {
            let system_id = self.ctx.choose(&systems).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::IntegratesWith,
                &integration_id,
                &system_id,
                weight,
                CONF_DEPENDENCY,
                vec![("dependency_type", json!("runtime"))],
            );
            rels.push(rel);
        }
    }

    // --- Data layer ---------------------------------------------------------

    fn data_to_systems(&mut self, rels: &mut Vec<Relationship>) {
        let assets = self.ctx.ids(EntityType::DataAsset);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for asset_id in assets {
            let system_id = self.ctx.choose(&systems).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::Stores,
                &system_id,
                &asset_id,
                weight,
                CONF_DEPENDENCY,
                vec![("storage", json!("primary"))],
            );
            rels.push(rel);
        }
    }

    fn assets_to_domains(&mut self, rels: &mut Vec<Relationship>) {
        let assets = self.ctx.ids(EntityType::DataAsset);
        let domains = self.ctx.ids(EntityType::DataDomain);
        if domains.is_empty() {
            return;
        }
        for asset_id in assets {
            let domain_id = self.ctx.choose(&domains).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::ClassifiedAs,
                &asset_id,
                &domain_id,
                weight,
                CONF_DEPENDENCY,
                vec![("basis", json!("catalog_mapping"))],
            );
            rels.push(rel);
        }
    }

    fn flows_to_systems(&mut self, rels: &mut Vec<Relationship>) {
        let flows = self.ctx.ids(EntityType::DataFlow);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for flow_id in flows {
            let system_id = self.ctx.choose(&systems).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::FlowsTo,
                &flow_id,
                &system_id,
                weight,
                CONF_DEPENDENCY,
                vec![("dependency_type", json!("data"))],
            );
            rels.push(rel);
        }
    }

    fn flows_to_domains(&mut self, rels: &mut Vec<Relationship>) {
        let flows = self.ctx.ids(EntityType::DataFlow);
        let domains = self.ctx.ids(EntityType::DataDomain);
        if domains.is_empty() {
            return;
        }
        for flow_id in flows {
            let domain_id = self.ctx.choose(&domains).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::BelongsTo,
                &flow_id,
                &domain_id,
                weight,
                CONF_DEPENDENCY,
                vec![("basis", json!("lineage"))],
            );
            rels.push(rel);
        }
    }

    // --- Governance ---------------------------------------------------------

    fn policies_to_assets(&mut self, rels: &mut Vec<Relationship>) {
        let policies = self.ctx.ids(EntityType::Policy);
        let mut targets = self.ctx.ids(EntityType::DataAsset);
        targets.extend(self.ctx.ids(EntityType::System));
        if targets.is_empty() {
            return;
        }
        for policy_id in policies {
            let count = self.ctx.draw_range(2, 6) as usize;
            let governed: Vec<String> = self
                .ctx
                .sample(&targets, count)
                .into_iter()
                .cloned()
                .collect();
            for target_id in governed {
                let enforcement = if self.ctx.chance(0.7) {
                    "mandatory"
                } else {
                    "recommended"
                };
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::Governs,
                    &policy_id,
                    &target_id,
                    weight,
                    CONF_ORG_FACT,
                    vec![("enforcement", json!(enforcement))],
                );
                rels.push(rel);
            }
        }
    }

    fn controls_to_regulations(&mut self, rels: &mut Vec<Relationship>) {
        let controls = self.ctx.ids(EntityType::Control);
        let regulations = self.ctx.ids(EntityType::Regulation);
        if regulations.is_empty() {
            return;
        }
        for control_id in controls {
            let regulation_id = self.ctx.choose(&regulations).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::Implements,
                &control_id,
                &regulation_id,
                weight,
                CONF_ORG_FACT,
                vec![("coverage", json!("partial"))],
            );
            rels.push(rel);
        }
    }

    fn controls_to_risks(&mut self, rels: &mut Vec<Relationship>) {
        let controls = self.ctx.ids(EntityType::Control);
        let risks = self.ctx.ids(EntityType::Risk);
        if controls.is_empty() {
            return;
        }
        for risk_id in risks {
            let count = self.ctx.draw_range(1, 3) as usize;
            let mitigating: Vec<String> = self
                .ctx
                .sample(&controls, count)
                .into_iter()
                .cloned()
                .collect();
            for control_id in mitigating {
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::Mitigates,
                    &control_id,
                    &risk_id,
                    weight,
                    CONF_DEPENDENCY,
                    vec![("mechanism", json!("risk_reduction"))],
                );
                rels.push(rel);
            }
        }
    }

    /// Controls mitigate vulnerabilities with severity-derived weights.
    fn controls_to_vulnerabilities(&mut self, rels: &mut Vec<Relationship>) {
        let controls = self.ctx.ids(EntityType::Control);
        let vulns: Vec<(String, Severity)> = self
            .ctx
            .entities(EntityType::Vulnerability)
            .iter()
            .filter_map(|v| match &v.kind {
                EntityKind::Vulnerability(vuln) => Some((v.id.clone(), vuln.severity)),
                _ => None,
            })
            .collect();
        if controls.is_empty() {
            return;
        }
        for (vuln_id, severity) in vulns {
            if !self.ctx.chance(0.6) {
                continue;
            }
            let control_id = self.ctx.choose(&controls).clone();
            let rel = self.edge(
                RelationshipType::Mitigates,
                &control_id,
                &vuln_id,
                severity.weight(),
                CONF_DEPENDENCY,
                vec![("mechanism", json!("compensating_control"))],
            );
            rels.push(rel);
        }
    }

    fn threats_to_risks(&mut self, rels: &mut Vec<Relationship>) {
        let threats = self.ctx.ids(EntityType::Threat);
        let risks = self.ctx.ids(EntityType::Risk);
        if risks.is_empty() {
            return;
        }
        for threat_id in threats {
            let risk_id = self.ctx.choose(&risks).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::CreatesRisk,
                &threat_id,
                &risk_id,
                weight,
                CONF_DEPENDENCY,
                vec![("pathway", json!("threat_realisation"))],
            );
            rels.push(rel);
        }
    }

    /// Systems, vendors, and sensitive data assets fall under regulations.
    fn subject_to_regulations(&mut self, rels: &mut Vec<Relationship>) {
        let regulations = self.ctx.ids(EntityType::Regulation);
        if regulations.is_empty() {
            return;
        }
        let mut subjects = self.ctx.ids(EntityType::Vendor);
        subjects.extend(self.ctx.ids(EntityType::Product));
        let sensitive_assets: Vec<String> = self
            .ctx
            .entities(EntityType::DataAsset)
            .iter()
            .filter(|a| match &a.kind {
                EntityKind::DataAsset(asset) => asset.contains_pii,
                _ => false,
            })
            .map(|a| a.id.clone())
            .collect();
        subjects.extend(sensitive_assets);
        let critical_systems: Vec<String> = self
            .ctx
            .entities(EntityType::System)
            .iter()
            .filter(|s| match &s.kind {
                EntityKind::System(sys) => sys.criticality >= Severity::High,
                _ => false,
            })
            .map(|s| s.id.clone())
            .collect();
        subjects.extend(critical_systems);

        for subject_id in subjects {
            let regulation_id = self.ctx.choose(&regulations).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::SubjectTo,
                &subject_id,
                &regulation_id,
                weight,
                CONF_ORG_FACT,
                vec![("applicability", json!("directly_regulated"))],
            );
            rels.push(rel);
        }
    }

    // --- Security ------------------------------------------------------------

    fn vulnerabilities_to_systems(&mut self, rels: &mut Vec<Relationship>) {
        let vulns: Vec<(String, Severity, bool)> = self
            .ctx
            .entities(EntityType::Vulnerability)
            .iter()
            .filter_map(|v| match &v.kind {
                EntityKind::Vulnerability(vuln) => {
                    Some((v.id.clone(), vuln.severity, vuln.exploit_available))
                }
                _ => None,
            })
            .collect();
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for (vuln_id, severity, exploit_available) in vulns {
            let count = self.ctx.draw_range(1, 3) as usize;
            let affected: Vec<String> = self
                .ctx
                .sample(&systems, count)
                .into_iter()
                .cloned()
                .collect();
            let maturity = if exploit_available {
                *self.ctx.choose(&["weaponized", "poc"])
            } else {
                "theoretical"
            };
            for system_id in affected {
                let rel = self.edge(
                    RelationshipType::Affects,
                    &vuln_id,
                    &system_id,
                    severity.weight(),
                    CONF_DEPENDENCY,
                    vec![("exploit_maturity", json!(maturity))],
                );
                rels.push(rel);
            }
        }
    }

    fn actors_to_vulnerabilities(&mut self, rels: &mut Vec<Relationship>) {
        let actors = self.ctx.ids(EntityType::ThreatActor);
        let vulns: Vec<(String, Severity)> = self
            .ctx
            .entities(EntityType::Vulnerability)
            .iter()
            .filter_map(|v| match &v.kind {
                EntityKind::Vulnerability(vuln) => Some((v.id.clone(), vuln.severity)),
                _ => None,
            })
            .collect();
        if vulns.is_empty() {
            return;
        }
        for actor_id in actors {
            let count = self.ctx.draw_range(1, 3) as usize;
            let exploited: Vec<(String, Severity)> = self
                .ctx
                .sample(&vulns, count)
                .into_iter()
                .cloned()
                .collect();
            for (vuln_id, severity) in exploited {
                let rel = self.edge(
                    RelationshipType::Exploits,
                    &actor_id,
                    &vuln_id,
                    severity.weight(),
                    CONF_THREAT,
                    vec![("attribution", json!("threat_intelligence"))],
                );
                rels.push(rel);
            }
        }
    }

    fn actors_to_targets(&mut self, rels: &mut Vec<Relationship>) {
        let actors = self.ctx.ids(EntityType::ThreatActor);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for actor_id in actors {
            if !self.ctx.chance(0.7) {
                continue;
            }
            let system_id = self.ctx.choose(&systems).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::Targets,
                &actor_id,
                &system_id,
                weight,
                CONF_THREAT,
                vec![("campaign", json!("observed"))],
            );
            rels.push(rel);
        }
    }

    fn incidents_to_systems(&mut self, rels: &mut Vec<Relationship>) {
        let incidents: Vec<(String, Severity)> = self
            .ctx
            .entities(EntityType::Incident)
            .iter()
            .filter_map(|i| match &i.kind {
                EntityKind::Incident(incident) => Some((i.id.clone(), incident.severity)),
                _ => None,
            })
            .collect();
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for (incident_id, severity) in incidents {
            let system_id = self.ctx.choose(&systems).clone();
            let rel = self.edge(
                RelationshipType::Affects,
                &incident_id,
                &system_id,
                severity.weight(),
                CONF_DEPENDENCY,
                vec![("impact", json!("service_degradation"))],
            );
            rels.push(rel);
        }
    }

    // --- Facilities ----------------------------------------------------------

    fn departments_to_locations(&mut self, rels: &mut Vec<Relationship>) {
        let departments = self.ctx.ids(EntityType::Department);
        let locations = self.ctx.ids(EntityType::Location);
        if locations.is_empty() {
            return;
        }
        for dept_id in departments {
            let location_id = self.ctx.choose(&locations).clone();
            let rel = self.edge(
                RelationshipType::LocatedAt,
                &dept_id,
                &location_id,
                1.0,
                CONF_ORG_FACT,
                vec![("basis", json!("facilities_register"))],
            );
            rels.push(rel);
        }
    }

    fn networks_to_locations(&mut self, rels: &mut Vec<Relationship>) {
        let networks = self.ctx.ids(EntityType::Network);
        let locations = self.ctx.ids(EntityType::Location);
        if locations.is_empty() {
            return;
        }
        for network_id in networks {
            let location_id = self.ctx.choose(&locations).clone();
            let rel = self.edge(
                RelationshipType::LocatedAt,
                &network_id,
                &location_id,
                1.0,
                CONF_ORG_FACT,
                vec![("basis", json!("network_inventory"))],
            );
            rels.push(rel);
        }
    }

    fn sites_to_geographies(&mut self, rels: &mut Vec<Relationship>) {
        let sites = self.ctx.ids(EntityType::Site);
        let geographies = self.ctx.ids(EntityType::Geography);
        if geographies.is_empty() {
            return;
        }
        for site_id in sites {
            let geography_id = self.ctx.choose(&geographies).clone();
            let rel = self.edge(
                RelationshipType::LocatedIn,
                &site_id,
                &geography_id,
                1.0,
                CONF_ORG_FACT,
                vec![("basis", json!("facilities_register"))],
            );
            rels.push(rel);
        }
    }

    // --- Commercial ----------------------------------------------------------

    fn vendors_to_systems(&mut self, rels: &mut Vec<Relationship>) {
        let vendors = self.ctx.ids(EntityType::Vendor);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for vendor_id in vendors {
            let count = self.ctx.draw_range(1, 3) as usize;
            let supplied: Vec<String> = self
                .ctx
                .sample(&systems, count)
                .into_iter()
                .cloned()
                .collect();
            for system_id in supplied {
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::SuppliedBy,
                    &system_id,
                    &vendor_id,
                    weight,
                    CONF_DEPENDENCY,
                    vec![("supply", json!("software"))],
                );
                rels.push(rel);
            }
        }
    }

    fn vendors_provide_products(&mut self, rels: &mut Vec<Relationship>) {
        let vendors = self.ctx.ids(EntityType::Vendor);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() || vendors.is_empty() {
            return;
        }
        let count = (vendors.len() / 2).max(1);
        let chosen: Vec<String> = self
            .ctx
            .sample(&vendors, count)
            .into_iter()
            .cloned()
            .collect();
        for vendor_id in chosen {
            let system_id = self.ctx.choose(&systems).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::Provides,
                &vendor_id,
                &system_id,
                weight,
                CONF_DEPENDENCY,
                vec![("supply", json!("managed_service"))],
            );
            rels.push(rel);
        }
    }

    fn contracts_to_vendors(&mut self, rels: &mut Vec<Relationship>) {
        let contracts = self.ctx.ids(EntityType::Contract);
        let vendors = self.ctx.ids(EntityType::Vendor);
        if vendors.is_empty() {
            return;
        }
        for contract_id in contracts {
            let vendor_id = self.ctx.choose(&vendors).clone();
            let rel = self.edge(
                RelationshipType::ContractsWith,
                &contract_id,
                &vendor_id,
                1.0,
                CONF_ORG_FACT,
                vec![("instrument", json!("signed_agreement"))],
            );
            rels.push(rel);
        }
    }

    fn customers_to_contracts(&mut self, rels: &mut Vec<Relationship>) {
        let customers = self.ctx.ids(EntityType::Customer);
        let contracts = self.ctx.ids(EntityType::Contract);
        if contracts.is_empty() {
            return;
        }
        for customer_id in customers {
            if !self.ctx.chance(0.5) {
                continue;
            }
            let contract_id = self.ctx.choose(&contracts).clone();
            let rel = self.edge(
                RelationshipType::Holds,
                &customer_id,
                &contract_id,
                1.0,
                CONF_ORG_FACT,
                vec![("instrument", json!("signed_agreement"))],
            );
            rels.push(rel);
        }
    }

    fn customers_to_products(&mut self, rels: &mut Vec<Relationship>) {
        let customers = self.ctx.ids(EntityType::Customer);
        let products = self.ctx.ids(EntityType::Product);
        if products.is_empty() {
            return;
        }
        for customer_id in customers {
            let count = self.ctx.draw_range(1, 3) as usize;
            let bought: Vec<String> = self
                .ctx
                .sample(&products, count)
                .into_iter()
                .cloned()
                .collect();
            for product_id in bought {
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::Buys,
                    &customer_id,
                    &product_id,
                    weight,
                    CONF_ORG_FACT,
                    vec![("channel", json!("direct"))],
                );
                rels.push(rel);
            }
        }
    }

    fn products_to_portfolios(&mut self, rels: &mut Vec<Relationship>) {
        let products = self.ctx.ids(EntityType::Product);
        let portfolios = self.ctx.ids(EntityType::ProductPortfolio);
        if portfolios.is_empty() {
            return;
        }
        for product_id in products {
            let portfolio_id = self.ctx.choose(&portfolios).clone();
            let rel = self.edge(
                RelationshipType::BelongsTo,
                &product_id,
                &portfolio_id,
                1.0,
                CONF_ORG_FACT,
                vec![("grouping", json!("portfolio"))],
            );
            rels.push(rel);
        }
    }

    fn products_to_segments(&mut self, rels: &mut Vec<Relationship>) {
        let products = self.ctx.ids(EntityType::Product);
        let segments = self.ctx.ids(EntityType::MarketSegment);
        if segments.is_empty() {
            return;
        }
        for product_id in products {
            let segment_id = self.ctx.choose(&segments).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::Serves,
                &product_id,
                &segment_id,
                weight,
                CONF_DEPENDENCY,
                vec![("fit", json!("primary_market"))],
            );
            rels.push(rel);
        }
    }

    // --- Capabilities & initiatives -----------------------------------------

    fn systems_to_capabilities(&mut self, rels: &mut Vec<Relationship>) {
        let capabilities = self.ctx.ids(EntityType::BusinessCapability);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for capability_id in capabilities {
            let count = self.ctx.draw_range(1, 3) as usize;
            let supporting: Vec<String> = self
                .ctx
                .sample(&systems, count)
                .into_iter()
                .cloned()
                .collect();
            for system_id in supporting {
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::Supports,
                    &system_id,
                    &capability_id,
                    weight,
                    CONF_DEPENDENCY,
                    vec![("dependency_type", json!("runtime"))],
                );
                rels.push(rel);
            }
        }
    }

    fn capabilities_realized_by_systems(&mut self, rels: &mut Vec<Relationship>) {
        let capabilities = self.ctx.ids(EntityType::BusinessCapability);
        let systems = self.ctx.ids(EntityType::System);
        if systems.is_empty() {
            return;
        }
        for capability_id in capabilities {
            if !self.ctx.chance(0.5) {
                continue;
            }
            let system_id = self.ctx.choose(&systems).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::RealizedBy,
                &capability_id,
                &system_id,
                weight,
                CONF_DEPENDENCY,
                vec![("realisation", json!("primary_platform"))],
            );
            rels.push(rel);
        }
    }

    fn initiatives_impact(&mut self, rels: &mut Vec<Relationship>) {
        let initiatives = self.ctx.ids(EntityType::Initiative);
        let systems = self.ctx.ids(EntityType::System);
        let capabilities = self.ctx.ids(EntityType::BusinessCapability);
        for initiative_id in initiatives {
            if !systems.is_empty() {
                let system_id = self.ctx.choose(&systems).clone();
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::Impacts,
                    &initiative_id,
                    &system_id,
                    weight,
                    CONF_DEPENDENCY,
                    vec![("effect", json!("modernisation"))],
                );
                rels.push(rel);
            }
            if !capabilities.is_empty() {
                let capability_id = self.ctx.choose(&capabilities).clone();
                let weight = self.drawn_weight();
                let rel = self.edge(
                    RelationshipType::Impacts,
                    &initiative_id,
                    &capability_id,
                    weight,
                    CONF_DEPENDENCY,
                    vec![("effect", json!("uplift"))],
                );
                rels.push(rel);
            }
        }
    }

    fn initiatives_funded(&mut self, rels: &mut Vec<Relationship>) {
        let initiatives = self.ctx.ids(EntityType::Initiative);
        let departments = self.ctx.ids(EntityType::Department);
        if departments.is_empty() {
            return;
        }
        for initiative_id in initiatives {
            let dept_id = self.ctx.choose(&departments).clone();
            let rel = self.edge(
                RelationshipType::FundedBy,
                &initiative_id,
                &dept_id,
                1.0,
                CONF_ORG_FACT,
                vec![("budget_line", json!("capital"))],
            );
            rels.push(rel);
        }
    }

    fn initiatives_address_risks(&mut self, rels: &mut Vec<Relationship>) {
        let initiatives = self.ctx.ids(EntityType::Initiative);
        let risks = self.ctx.ids(EntityType::Risk);
        if risks.is_empty() {
            return;
        }
        for initiative_id in initiatives {
            if !self.ctx.chance(0.4) {
                continue;
            }
            let risk_id = self.ctx.choose(&risks).clone();
            let weight = self.drawn_weight();
            let rel = self.edge(
                RelationshipType::Addresses,
                &initiative_id,
                &risk_id,
                weight,
                CONF_DEPENDENCY,
                vec![("mechanism", json!("remediation_programme"))],
            );
            rels.push(rel);
        }
    }
}

/// One sweep over the graph after edge creation: sets the declared mirror
/// fields on entities via `update_entity`. The mirror set is closed; only
/// the fields declared on the kind schemas are ever written.
pub fn populate_mirror_fields(engine: &mut dyn GraphEngine) -> CoreResult<usize> {
    let entities = engine.list_entities(None, None);
    let kind_of: HashMap<String, EntityType> = entities
        .iter()
        .map(|e| (e.id.clone(), e.entity_type()))
        .collect();

    // entity id → field → value
    let mut patches: HashMap<String, BTreeMap<String, Value>> = HashMap::new();
    let mut role_fills: HashMap<String, Vec<String>> = HashMap::new();

    for entity in &entities {
        for rel in engine.relationships(&entity.id, Direction::Out, None) {
            let src = &rel.source_id;
            let tgt = &rel.target_id;
            let (src_kind, tgt_kind) = match (kind_of.get(src), kind_of.get(tgt)) {
                (Some(s), Some(t)) => (*s, *t),
                _ => continue,
            };
            match (rel.relationship_type, src_kind, tgt_kind) {
                (RelationshipType::WorksIn, EntityType::Person, EntityType::Department) => {
                    patches
                        .entry(src.clone())
                        .or_default()
                        .insert("department_id".into(), json!(tgt));
                }
                (RelationshipType::HasRole, EntityType::Person, EntityType::Role) => {
                    let patch = patches.entry(src.clone()).or_default();
                    match patch.get_mut("holds_roles") {
                        Some(Value::Array(roles)) => roles.push(json!(tgt)),
                        _ => {
                            patch.insert("holds_roles".into(), json!([tgt]));
                        }
                    }
                    role_fills.entry(tgt.clone()).or_default().push(src.clone());
                }
                (RelationshipType::LocatedAt, EntityType::Person, EntityType::Location) => {
                    patches
                        .entry(src.clone())
                        .or_default()
                        .insert("located_at".into(), json!(tgt));
                }
                (RelationshipType::LocatedAt, EntityType::Department, EntityType::Location) => {
                    patches
                        .entry(src.clone())
                        .or_default()
                        .insert("location_id".into(), json!(tgt));
                }
                (RelationshipType::LocatedAt, EntityType::Network, EntityType::Location) => {
                    patches
                        .entry(src.clone())
                        .or_default()
                        .insert("location_id".into(), json!(tgt));
                }
                (RelationshipType::Manages, EntityType::Person, EntityType::Department) => {
                    patches
                        .entry(tgt.clone())
                        .or_default()
                        .insert("head_id".into(), json!(src));
                }
                (RelationshipType::ConnectsTo, EntityType::System, EntityType::Network) => {
                    patches
                        .entry(src.clone())
                        .or_default()
                        .insert("network_id".into(), json!(tgt));
                }
                (RelationshipType::ResponsibleFor, EntityType::Department, EntityType::System) => {
                    patches
                        .entry(tgt.clone())
                        .or_default()
                        .insert("department_id".into(), json!(src));
                }
                (RelationshipType::Stores, EntityType::System, EntityType::DataAsset) => {
                    patches
                        .entry(tgt.clone())
                        .or_default()
                        .insert("system_id".into(), json!(src));
                }
                (RelationshipType::Affects, EntityType::Vulnerability, EntityType::System) => {
                    let patch = patches.entry(src.clone()).or_default();
                    match patch.get_mut("affected_system_ids") {
                        Some(Value::Array(systems)) => systems.push(json!(tgt)),
                        _ => {
                            patch.insert("affected_system_ids".into(), json!([tgt]));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    for (role_id, persons) in role_fills {
        let patch = patches.entry(role_id).or_default();
        patch.insert("headcount_filled".into(), json!(persons.len()));
        patch.insert("filled_by_persons".into(), json!(persons));
    }

    let updated = patches.len();
    for (entity_id, patch) in patches {
        engine.update_entity(&entity_id, &patch)?;
    }
    info!(entities = updated, "mirror fields populated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::organization::generate_departments;
    use crate::generators::people::generate_people;
    use crate::profiles::tech_company;
    use org_graph_core::schema::validate_relationship;

    fn woven_fixture() -> (GenerationContext, Vec<Relationship>) {
        let mut ctx = GenerationContext::new(tech_company("Acme", 200), 42);
        let locations = crate::generators::foundation::generate_locations(2, &mut ctx);
        ctx.store(EntityType::Location, locations);
        let departments = generate_departments(&mut ctx);
        ctx.store(EntityType::Department, departments);
        let roles = crate::generators::people::generate_roles(&mut ctx);
        ctx.store(EntityType::Role, roles);
        let people = generate_people(200, &mut ctx);
        ctx.store(EntityType::Person, people);
        let systems = crate::generators::technology::generate_systems(10, &mut ctx);
        ctx.store(EntityType::System, systems);
        let vulns = crate::generators::compliance::generate_vulnerabilities(4, &mut ctx);
        ctx.store(EntityType::Vulnerability, vulns);
        let rels = RelationshipWeaver::new(&mut ctx).weave_all();
        (ctx, rels)
    }

    #[test]
    fn woven_edges_satisfy_the_schema_table() {
        let (ctx, rels) = woven_fixture();
        let kind_of: HashMap<String, EntityType> = EntityType::ALL
            .into_iter()
            .flat_map(|t| {
                ctx.entities(t)
                    .iter()
                    .map(move |e| (e.id.clone(), t))
                    .collect::<Vec<_>>()
            })
            .collect();
        for rel in &rels {
            let src = kind_of[&rel.source_id];
            let tgt = kind_of[&rel.target_id];
            validate_relationship(rel.relationship_type, src, tgt)
                .unwrap_or_else(|e| panic!("{}: {e}", rel.relationship_type));
        }
    }

    #[test]
    fn metadata_is_rounded_banded_and_typed() {
        let (_, rels) = woven_fixture();
        for rel in &rels {
            assert!((0.0..=1.0).contains(&rel.weight));
            assert!((0.0..=1.0).contains(&rel.confidence));
            // Two-decimal rounding.
            assert_eq!(rel.weight, (rel.weight * 100.0).round() / 100.0);
            assert_eq!(rel.confidence, (rel.confidence * 100.0).round() / 100.0);
            assert!(!rel.properties.is_empty(), "{} has empty properties", rel.id);
        }
    }

    #[test]
    fn every_person_works_in_exactly_one_department() {
        let (ctx, rels) = woven_fixture();
        let mut works_in_count: HashMap<&str, usize> = HashMap::new();
        for rel in &rels {
            if rel.relationship_type == RelationshipType::WorksIn {
                *works_in_count.entry(rel.source_id.as_str()).or_default() += 1;
            }
        }
        for person in ctx.entities(EntityType::Person) {
            assert_eq!(
                works_in_count.get(person.id.as_str()),
                Some(&1),
                "person {} has wrong works_in count",
                person.name
            );
        }
    }

    #[test]
    fn affects_edges_use_severity_weights() {
        let (ctx, rels) = woven_fixture();
        let severities: HashMap<String, Severity> = ctx
            .entities(EntityType::Vulnerability)
            .iter()
            .filter_map(|v| match &v.kind {
                EntityKind::Vulnerability(vuln) => Some((v.id.clone(), vuln.severity)),
                _ => None,
            })
            .collect();
        for rel in &rels {
            if rel.relationship_type == RelationshipType::Affects {
                if let Some(severity) = severities.get(&rel.source_id) {
                    assert_eq!(rel.weight, severity.weight());
                }
            }
        }
    }

    #[test]
    fn mirror_fields_land_on_entities() {
        use org_graph_engine::MemoryGraph;
        let (ctx, rels) = woven_fixture();
        let mut engine = MemoryGraph::new();
        let mut all = Vec::new();
        for t in EntityType::ALL {
            all.extend(ctx.entities(t).to_vec());
        }
        engine.add_entities_bulk(all).unwrap();
        engine.add_relationships_bulk(rels).unwrap();
        populate_mirror_fields(&mut engine).unwrap();

        let person = engine
            .list_entities(Some(EntityType::Person), Some(1))
            .pop()
            .unwrap();
        let EntityKind::Person(p) = &person.kind else {
            panic!("wrong kind");
        };
        assert!(p.department_id.is_some());
        assert_eq!(p.holds_roles.len(), 1);
        assert!(p.located_at.is_some());
        assert_eq!(person.version, 2);

        // Role headcount mirrors the has_role fan-in.
        let roles = engine.list_entities(Some(EntityType::Role), None);
        let filled: u32 = roles
            .iter()
            .map(|r| match &r.kind {
                EntityKind::Role(role) => role.headcount_filled,
                _ => 0,
            })
            .sum();
        assert_eq!(filled as usize, ctx.entities(EntityType::Person).len());
    }
}
