//! Organisational profiles: the parameter set driving synthetic generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use org_graph_core::scaling::{industry_coefficients, ScalingCoefficients};
use org_graph_core::types::EntityType;

/// Named department with its share of the workforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSpec {
    pub name: String,
    pub headcount_fraction: f64,
    pub data_sensitivity: String,
}

impl DepartmentSpec {
    pub fn new(name: &str, headcount_fraction: f64, data_sensitivity: &str) -> Self {
        DepartmentSpec {
            name: name.to_string(),
            headcount_fraction,
            data_sensitivity: data_sensitivity.to_string(),
        }
    }
}

/// Named network segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    pub cidr: String,
    /// dmz, internal, restricted, guest
    pub zone: String,
}

impl NetworkSpec {
    pub fn new(name: &str, cidr: &str, zone: &str) -> Self {
        NetworkSpec {
            name: name.to_string(),
            cidr: cidr.to_string(),
            zone: zone.to_string(),
        }
    }
}

/// Parameterized description of an organisation. Different profiles produce
/// structurally different graphs; entity counts come from the scaling model
/// unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgProfile {
    pub name: String,
    pub industry: String,
    pub employee_count: u32,
    pub department_specs: Vec<DepartmentSpec>,
    pub network_specs: Vec<NetworkSpec>,
    /// Fraction of systems expected to carry at least one open vulnerability.
    pub vulnerability_probability: f64,
    pub contractor_fraction: f64,
    /// Per-kind count overrides. Derived kinds (department, role, network,
    /// vulnerability, person) are never overridable and are ignored here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<EntityType, u32>,
}

impl OrgProfile {
    /// Industry coefficient table for this profile.
    pub fn coefficients(&self) -> ScalingCoefficients {
        industry_coefficients(&self.industry)
    }

    /// Email domain derived from the organisation name.
    pub fn email_domain(&self) -> String {
        let slug: String = self
            .name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        format!("{slug}.com")
    }
}

/// Mid-size technology company profile.
pub fn tech_company(name: &str, employee_count: u32) -> OrgProfile {
    OrgProfile {
        name: name.to_string(),
        industry: "technology".to_string(),
        employee_count,
        department_specs: vec![
            DepartmentSpec::new("Engineering", 0.35, "high"),
            DepartmentSpec::new("Product", 0.10, "medium"),
            DepartmentSpec::new("Sales", 0.15, "medium"),
            DepartmentSpec::new("Marketing", 0.08, "medium"),
            DepartmentSpec::new("HR", 0.05, "critical"),
            DepartmentSpec::new("Finance", 0.05, "critical"),
            DepartmentSpec::new("Legal", 0.03, "high"),
            DepartmentSpec::new("IT Operations", 0.10, "high"),
            DepartmentSpec::new("Security", 0.05, "critical"),
            DepartmentSpec::new("Executive", 0.04, "critical"),
        ],
        network_specs: vec![
            NetworkSpec::new("Corporate", "10.0.0.0/16", "internal"),
            NetworkSpec::new("DMZ", "172.16.0.0/24", "dmz"),
            NetworkSpec::new("Dev/Staging", "10.1.0.0/16", "internal"),
            NetworkSpec::new("Guest WiFi", "192.168.0.0/24", "guest"),
        ],
        vulnerability_probability: 0.20,
        contractor_fraction: 0.10,
        overrides: BTreeMap::new(),
    }
}

/// Financial-services firm profile.
pub fn financial_org(name: &str, employee_count: u32) -> OrgProfile {
    OrgProfile {
        name: name.to_string(),
        industry: "financial_services".to_string(),
        employee_count,
        department_specs: vec![
            DepartmentSpec::new("Trading", 0.15, "critical"),
            DepartmentSpec::new("Technology", 0.20, "high"),
            DepartmentSpec::new("Risk Management", 0.10, "critical"),
            DepartmentSpec::new("Compliance & Legal", 0.08, "critical"),
            DepartmentSpec::new("Operations", 0.17, "high"),
            DepartmentSpec::new("Client Services", 0.12, "high"),
            DepartmentSpec::new("Finance & Accounting", 0.08, "critical"),
            DepartmentSpec::new("Information Security", 0.05, "critical"),
            DepartmentSpec::new("Internal Audit", 0.03, "critical"),
            DepartmentSpec::new("Executive", 0.02, "critical"),
        ],
        network_specs: vec![
            NetworkSpec::new("Corporate", "10.10.0.0/16", "internal"),
            NetworkSpec::new("Trading Floor", "10.20.0.0/24", "restricted"),
            NetworkSpec::new("DMZ", "172.16.1.0/24", "dmz"),
            NetworkSpec::new("Disaster Recovery", "10.30.0.0/16", "restricted"),
        ],
        vulnerability_probability: 0.15,
        contractor_fraction: 0.08,
        overrides: BTreeMap::new(),
    }
}

/// Healthcare provider profile.
pub fn healthcare_org(name: &str, employee_count: u32) -> OrgProfile {
    OrgProfile {
        name: name.to_string(),
        industry: "healthcare".to_string(),
        employee_count,
        department_specs: vec![
            DepartmentSpec::new("Clinical Operations", 0.30, "critical"),
            DepartmentSpec::new("Nursing", 0.25, "critical"),
            DepartmentSpec::new("Administration", 0.10, "high"),
            DepartmentSpec::new("IT", 0.07, "high"),
            DepartmentSpec::new("Finance & Billing", 0.08, "critical"),
            DepartmentSpec::new("Pharmacy", 0.05, "critical"),
            DepartmentSpec::new("Research", 0.06, "high"),
            DepartmentSpec::new("Compliance", 0.04, "critical"),
            DepartmentSpec::new("Facilities", 0.05, "medium"),
        ],
        network_specs: vec![
            NetworkSpec::new("Clinical", "10.50.0.0/16", "restricted"),
            NetworkSpec::new("Corporate", "10.60.0.0/16", "internal"),
            NetworkSpec::new("Medical Devices", "10.70.0.0/24", "restricted"),
            NetworkSpec::new("Guest WiFi", "192.168.10.0/24", "guest"),
        ],
        vulnerability_probability: 0.18,
        contractor_fraction: 0.12,
        overrides: BTreeMap::new(),
    }
}

/// Look up a built-in profile by industry name.
pub fn profile_for_industry(industry: &str, name: &str, employee_count: u32) -> OrgProfile {
    match industry {
        "financial_services" => financial_org(name, employee_count),
        "healthcare" => healthcare_org(name, employee_count),
        _ => tech_company(name, employee_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headcount_fractions_stay_at_or_below_one() {
        for profile in [
            tech_company("T", 1000),
            financial_org("F", 1000),
            healthcare_org("H", 1000),
        ] {
            let total: f64 = profile
                .department_specs
                .iter()
                .map(|s| s.headcount_fraction)
                .sum();
            assert!(total <= 1.0 + 1e-9, "{}: {total}", profile.name);
        }
    }

    #[test]
    fn email_domain_is_slugged() {
        let p = tech_company("Acme Technologies", 100);
        assert_eq!(p.email_domain(), "acmetechnologies.com");
    }
}
