//! The closed entity catalog: 30 kinds grouped by generation layer.
//!
//! [`EntityType`] is the lowercase discriminant used in filters, indexes, and
//! the relationship schema. [`EntityKind`] carries the kind-specific fields
//! and is flattened into the canonical JSON object, tagged by `entity_type`.
//!
//! Mirror fields (denormalisations maintained by the relationship weaver,
//! e.g. `Person::holds_roles`) are declared here on the kind structs; they
//! are never dynamic extras.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::risk::RiskLevel;
use crate::types::enums::{DataClassification, Severity};

/// Discriminant for the closed entity catalog, grouped by generation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    // L00 Foundation
    Location,
    // L01 Compliance
    Policy,
    Regulation,
    Control,
    Risk,
    Threat,
    Vulnerability,
    ThreatActor,
    Incident,
    // L02 Technology
    Network,
    System,
    Integration,
    // L03 Data
    DataAsset,
    DataDomain,
    DataFlow,
    // L04 Organization
    Department,
    OrganizationalUnit,
    // L05 People
    Person,
    Role,
    // L06 Capabilities
    BusinessCapability,
    // L07 Locations
    Site,
    Geography,
    Jurisdiction,
    // L08 Products
    ProductPortfolio,
    Product,
    // L09 Customers
    MarketSegment,
    Customer,
    // L10 Vendors
    Vendor,
    Contract,
    // L11 Initiatives
    Initiative,
}

impl EntityType {
    pub const ALL: [EntityType; 30] = [
        EntityType::Location,
        EntityType::Policy,
        EntityType::Regulation,
        EntityType::Control,
        EntityType::Risk,
        EntityType::Threat,
        EntityType::Vulnerability,
        EntityType::ThreatActor,
        EntityType::Incident,
        EntityType::Network,
        EntityType::System,
        EntityType::Integration,
        EntityType::DataAsset,
        EntityType::DataDomain,
        EntityType::DataFlow,
        EntityType::Department,
        EntityType::OrganizationalUnit,
        EntityType::Person,
        EntityType::Role,
        EntityType::BusinessCapability,
        EntityType::Site,
        EntityType::Geography,
        EntityType::Jurisdiction,
        EntityType::ProductPortfolio,
        EntityType::Product,
        EntityType::MarketSegment,
        EntityType::Customer,
        EntityType::Vendor,
        EntityType::Contract,
        EntityType::Initiative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Location => "location",
            EntityType::Policy => "policy",
            EntityType::Regulation => "regulation",
            EntityType::Control => "control",
            EntityType::Risk => "risk",
            EntityType::Threat => "threat",
            EntityType::Vulnerability => "vulnerability",
            EntityType::ThreatActor => "threat_actor",
            EntityType::Incident => "incident",
            EntityType::Network => "network",
            EntityType::System => "system",
            EntityType::Integration => "integration",
            EntityType::DataAsset => "data_asset",
            EntityType::DataDomain => "data_domain",
            EntityType::DataFlow => "data_flow",
            EntityType::Department => "department",
            EntityType::OrganizationalUnit => "organizational_unit",
            EntityType::Person => "person",
            EntityType::Role => "role",
            EntityType::BusinessCapability => "business_capability",
            EntityType::Site => "site",
            EntityType::Geography => "geography",
            EntityType::Jurisdiction => "jurisdiction",
            EntityType::ProductPortfolio => "product_portfolio",
            EntityType::Product => "product",
            EntityType::MarketSegment => "market_segment",
            EntityType::Customer => "customer",
            EntityType::Vendor => "vendor",
            EntityType::Contract => "contract",
            EntityType::Initiative => "initiative",
        }
    }

    /// Generation layer this kind belongs to (L00–L11).
    pub fn layer(self) -> u8 {
        match self {
            EntityType::Location => 0,
            EntityType::Policy
            | EntityType::Regulation
            | EntityType::Control
            | EntityType::Risk
            | EntityType::Threat
            | EntityType::Vulnerability
            | EntityType::ThreatActor
            | EntityType::Incident => 1,
            EntityType::Network | EntityType::System | EntityType::Integration => 2,
            EntityType::DataAsset | EntityType::DataDomain | EntityType::DataFlow => 3,
            EntityType::Department | EntityType::OrganizationalUnit => 4,
            EntityType::Person | EntityType::Role => 5,
            EntityType::BusinessCapability => 6,
            EntityType::Site | EntityType::Geography | EntityType::Jurisdiction => 7,
            EntityType::ProductPortfolio | EntityType::Product => 8,
            EntityType::MarketSegment | EntityType::Customer => 9,
            EntityType::Vendor | EntityType::Contract => 10,
            EntityType::Initiative => 11,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = EntityType::ALL.iter().map(|t| t.as_str()).collect();
                format!("Unknown entity_type '{s}'. Valid types: {valid:?}")
            })
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero_u32(n: &u32) -> bool {
    *n == 0
}

// ---------------------------------------------------------------------------
// L00 Foundation
// ---------------------------------------------------------------------------

/// Physical facility: office, data center, warehouse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location_type: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub security_level: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_physical_security: bool,
}

// ---------------------------------------------------------------------------
// L01 Compliance & Governance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub policy_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub review_cycle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Regulation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jurisdiction: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub applicability_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Control {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub control_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub control_domain: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub framework: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub objective: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub implementation_status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub automation_level: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
}

/// Risk register entry. `inherent_risk_level` is always derived from the
/// likelihood × impact matrix; `residual_risk_level` never exceeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    pub likelihood: RiskLevel,
    pub impact: RiskLevel,
    pub inherent_risk_level: RiskLevel,
    pub residual_risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response_strategy: String,
}

impl Default for Risk {
    fn default() -> Self {
        Risk {
            category: String::new(),
            likelihood: RiskLevel::Low,
            impact: RiskLevel::Low,
            inherent_risk_level: RiskLevel::Low,
            residual_risk_level: RiskLevel::Low,
            owner: String::new(),
            status: String::new(),
            response_strategy: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Threat {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub threat_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_if_realized: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub threat_source: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cve_id: String,
    #[serde(default)]
    pub cvss_score: f64,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub exploit_available: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub patch_available: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub affected_component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_date: Option<String>,
    /// Mirror of `affects` edges out of this vulnerability.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_system_ids: Vec<String>,
}

impl Default for Vulnerability {
    fn default() -> Self {
        Vulnerability {
            cve_id: String::new(),
            cvss_score: 0.0,
            severity: Severity::Low,
            status: String::new(),
            exploit_available: false,
            patch_available: false,
            affected_component: String::new(),
            discovery_date: None,
            affected_system_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreatActor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub actor_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sophistication: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub motivation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub origin_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ttps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_industries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub incident_type: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_cause: String,
}

impl Default for Incident {
    fn default() -> Self {
        Incident {
            incident_type: String::new(),
            severity: Severity::Low,
            status: String::new(),
            detected_at: None,
            resolved_at: None,
            root_cause: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// L02 Technology & Systems
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Network {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cidr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub vlan_id: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_monitored: bool,
    /// Mirror of the `located_at` edge out of this network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub software_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,
    pub criticality: Severity,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_internet_facing: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    /// Mirror of the `connects_to` edge out of this system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    /// Mirror of the `responsible_for` edge into this system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl Default for System {
    fn default() -> Self {
        System {
            system_type: String::new(),
            hostname: String::new(),
            ip_address: String::new(),
            os: String::new(),
            software_version: String::new(),
            environment: String::new(),
            criticality: Severity::Medium,
            is_internet_facing: false,
            ports: Vec::new(),
            technologies: Vec::new(),
            network_id: None,
            department_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub integration_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub frequency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub direction: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    pub criticality: Severity,
}

impl Default for Integration {
    fn default() -> Self {
        Integration {
            integration_type: String::new(),
            protocol: String::new(),
            data_format: String::new(),
            frequency: String::new(),
            direction: String::new(),
            status: String::new(),
            criticality: Severity::Medium,
        }
    }
}

// ---------------------------------------------------------------------------
// L03 Data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAsset {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub asset_type: String,
    pub classification: DataClassification,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub record_count: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub contains_pii: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub retention_period: String,
    /// Mirror of the `stores` edge into this asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
}

impl Default for DataAsset {
    fn default() -> Self {
        DataAsset {
            asset_type: String::new(),
            classification: DataClassification::Internal,
            record_count: 0,
            contains_pii: false,
            retention_period: String::new(),
            system_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataDomain {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain_owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_steward: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_level: Option<DataClassification>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub governance_status: String,
}

/// Movement of data between systems. Restricted/confidential flows always
/// carry `encryption_in_transit = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFlow {
    pub classification: DataClassification,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transfer_method: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub frequency: String,
    #[serde(default)]
    pub encryption_in_transit: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

impl Default for DataFlow {
    fn default() -> Self {
        DataFlow {
            classification: DataClassification::Internal,
            transfer_method: String::new(),
            frequency: String::new(),
            encryption_in_transit: false,
            status: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// L04 Organization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub headcount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_sensitivity: String,
    /// Set on sub-departments produced by subdivision; `None` on roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_department_id: Option<String>,
    /// Mirror of the `manages` edge into this department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_id: Option<String>,
    /// Mirror of the `located_at` edge out of this department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrganizationalUnit {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operational_status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub geographic_scope: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub functional_domain: String,
}

// ---------------------------------------------------------------------------
// L05 People
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub clearance_level: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    /// Mirror of the `works_in` edge out of this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Mirror of `has_role` edges out of this person.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holds_roles: Vec<String>,
    /// Mirror of the `located_at` edge out of this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub located_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Person {
    fn default() -> Self {
        Person {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            title: String::new(),
            employee_id: String::new(),
            clearance_level: String::new(),
            is_active: true,
            hire_date: None,
            department_id: None,
            holds_roles: Vec::new(),
            located_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_level: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_privileged: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Mirror of `has_role` edges into this role.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filled_by_persons: Vec<String>,
    /// Count of `filled_by_persons`, denormalised for cheap reporting.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub headcount_filled: u32,
}

// ---------------------------------------------------------------------------
// L06 Capabilities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCapability {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub maturity: String,
    pub criticality: Severity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
}

impl Default for BusinessCapability {
    fn default() -> Self {
        BusinessCapability {
            maturity: String::new(),
            criticality: Severity::Medium,
            owner: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// L07 Locations & Facilities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site_type: String,
    /// Always `"restricted"` for data-center sites.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub physical_security_tier: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operational_status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geography {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub country_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regulatory_regime: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Jurisdiction {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jurisdiction_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub legal_system: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub data_residency_required: bool,
}

// ---------------------------------------------------------------------------
// L08 Products & Services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPortfolio {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub portfolio_owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lifecycle_stage: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lifecycle_stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_revenue_generating: bool,
}

// ---------------------------------------------------------------------------
// L09 Customers & Markets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSegment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub segment_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub size_estimate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub customer_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_value: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Default for Customer {
    fn default() -> Self {
        Customer {
            customer_type: String::new(),
            industry: String::new(),
            annual_value: None,
            is_active: true,
        }
    }
}

// ---------------------------------------------------------------------------
// L10 Vendors & Partners
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    pub criticality: Severity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub risk_rating: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Default for Vendor {
    fn default() -> Self {
        Vendor {
            category: String::new(),
            criticality: Severity::Medium,
            risk_rating: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contract_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_value: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_renew: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

// ---------------------------------------------------------------------------
// L11 Strategic Initiatives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Initiative {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub initiative_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sponsor: String,
}

// ---------------------------------------------------------------------------
// Tagged union over all 30 kinds
// ---------------------------------------------------------------------------

/// Kind-specific payload, tagged by `entity_type` in the flattened JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum EntityKind {
    Location(Location),
    Policy(Policy),
    Regulation(Regulation),
    Control(Control),
    Risk(Risk),
    Threat(Threat),
    Vulnerability(Vulnerability),
    ThreatActor(ThreatActor),
    Incident(Incident),
    Network(Network),
    System(System),
    Integration(Integration),
    DataAsset(DataAsset),
    DataDomain(DataDomain),
    DataFlow(DataFlow),
    Department(Department),
    OrganizationalUnit(OrganizationalUnit),
    Person(Person),
    Role(Role),
    BusinessCapability(BusinessCapability),
    Site(Site),
    Geography(Geography),
    Jurisdiction(Jurisdiction),
    ProductPortfolio(ProductPortfolio),
    Product(Product),
    MarketSegment(MarketSegment),
    Customer(Customer),
    Vendor(Vendor),
    Contract(Contract),
    Initiative(Initiative),
}

impl EntityKind {
    /// The discriminant for this payload.
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityKind::Location(_) => EntityType::Location,
            EntityKind::Policy(_) => EntityType::Policy,
            EntityKind::Regulation(_) => EntityType::Regulation,
            EntityKind::Control(_) => EntityType::Control,
            EntityKind::Risk(_) => EntityType::Risk,
            EntityKind::Threat(_) => EntityType::Threat,
            EntityKind::Vulnerability(_) => EntityType::Vulnerability,
            EntityKind::ThreatActor(_) => EntityType::ThreatActor,
            EntityKind::Incident(_) => EntityType::Incident,
            EntityKind::Network(_) => EntityType::Network,
            EntityKind::System(_) => EntityType::System,
            EntityKind::Integration(_) => EntityType::Integration,
            EntityKind::DataAsset(_) => EntityType::DataAsset,
            EntityKind::DataDomain(_) => EntityType::DataDomain,
            EntityKind::DataFlow(_) => EntityType::DataFlow,
            EntityKind::Department(_) => EntityType::Department,
            EntityKind::OrganizationalUnit(_) => EntityType::OrganizationalUnit,
            EntityKind::Person(_) => EntityType::Person,
            EntityKind::Role(_) => EntityType::Role,
            EntityKind::BusinessCapability(_) => EntityType::BusinessCapability,
            EntityKind::Site(_) => EntityType::Site,
            EntityKind::Geography(_) => EntityType::Geography,
            EntityKind::Jurisdiction(_) => EntityType::Jurisdiction,
            EntityKind::ProductPortfolio(_) => EntityType::ProductPortfolio,
            EntityKind::Product(_) => EntityType::Product,
            EntityKind::MarketSegment(_) => EntityType::MarketSegment,
            EntityKind::Customer(_) => EntityType::Customer,
            EntityKind::Vendor(_) => EntityType::Vendor,
            EntityKind::Contract(_) => EntityType::Contract,
            EntityKind::Initiative(_) => EntityType::Initiative,
        }
    }
}

/// Declared field names per kind, used by the strict-mode importer to reject
/// unknown fields. Base fields are shared by every kind.
pub mod catalog {
    use super::EntityType;

    /// Fields common to every entity object.
    pub const BASE_FIELDS: &[&str] = &[
        "id",
        "entity_type",
        "name",
        "description",
        "tags",
        "metadata",
        "created_at",
        "updated_at",
        "valid_from",
        "valid_until",
        "version",
        "extra",
    ];

    /// Kind-specific declared fields (mirror fields included).
    pub fn kind_fields(entity_type: EntityType) -> &'static [&'static str] {
        match entity_type {
            EntityType::Location => &[
                "address", "city", "country", "location_type", "capacity",
                "is_primary", "security_level", "has_physical_security",
            ],
            EntityType::Policy => &[
                "policy_type", "status", "effective_date", "review_cycle", "owner",
            ],
            EntityType::Regulation => &[
                "short_name", "category", "jurisdiction", "applicability_status",
                "effective_date",
            ],
            EntityType::Control => &[
                "control_type", "control_domain", "framework", "objective",
                "implementation_status", "automation_level", "owner",
            ],
            EntityType::Risk => &[
                "category", "likelihood", "impact", "inherent_risk_level",
                "residual_risk_level", "owner", "status", "response_strategy",
            ],
            EntityType::Threat => &[
                "category", "threat_type", "likelihood", "impact_if_realized",
                "threat_source", "status",
            ],
            EntityType::Vulnerability => &[
                "cve_id", "cvss_score", "severity", "status", "exploit_available",
                "patch_available", "affected_component", "discovery_date",
                "affected_system_ids",
            ],
            EntityType::ThreatActor => &[
                "actor_type", "sophistication", "motivation", "origin_country",
                "first_seen", "last_seen", "aliases", "ttps", "target_industries",
            ],
            EntityType::Incident => &[
                "incident_type", "severity", "status", "detected_at", "resolved_at",
                "root_cause",
            ],
            EntityType::Network => &[
                "cidr", "zone", "vlan_id", "gateway", "dns_servers", "is_monitored",
                "location_id",
            ],
            EntityType::System => &[
                "system_type", "hostname", "ip_address", "os", "software_version",
                "environment", "criticality", "is_internet_facing", "ports",
                "technologies", "network_id", "department_id",
            ],
            EntityType::Integration => &[
                "integration_type", "protocol", "data_format", "frequency",
                "direction", "status", "criticality",
            ],
            EntityType::DataAsset => &[
                "asset_type", "classification", "record_count", "contains_pii",
                "retention_period", "system_id",
            ],
            EntityType::DataDomain => &[
                "domain_owner", "data_steward", "classification_level",
                "governance_status",
            ],
            EntityType::DataFlow => &[
                "classification", "transfer_method", "frequency",
                "encryption_in_transit", "status",
            ],
            EntityType::Department => &[
                "code", "headcount", "budget", "data_sensitivity",
                "parent_department_id", "head_id", "location_id",
            ],
            EntityType::OrganizationalUnit => &[
                "unit_type", "operational_status", "geographic_scope",
                "functional_domain",
            ],
            EntityType::Person => &[
                "first_name", "last_name", "email", "title", "employee_id",
                "clearance_level", "is_active", "hire_date", "department_id",
                "holds_roles", "located_at",
            ],
            EntityType::Role => &[
                "department_id", "access_level", "is_privileged", "permissions",
                "filled_by_persons", "headcount_filled",
            ],
            EntityType::BusinessCapability => &["maturity", "criticality", "owner"],
            EntityType::Site => &[
                "site_type", "physical_security_tier", "capacity", "city", "country",
                "operational_status",
            ],
            EntityType::Geography => &["region", "country_codes", "regulatory_regime"],
            EntityType::Jurisdiction => &[
                "jurisdiction_code", "legal_system", "data_residency_required",
            ],
            EntityType::ProductPortfolio => &["portfolio_owner", "lifecycle_stage"],
            EntityType::Product => &[
                "product_type", "lifecycle_stage", "launch_date",
                "is_revenue_generating",
            ],
            EntityType::MarketSegment => &["segment_type", "region", "size_estimate"],
            EntityType::Customer => &[
                "customer_type", "industry", "annual_value", "is_active",
            ],
            EntityType::Vendor => &["category", "criticality", "risk_rating", "is_active"],
            EntityType::Contract => &[
                "contract_type", "start_date", "end_date", "annual_value",
                "auto_renew", "status",
            ],
            EntityType::Initiative => &[
                "initiative_type", "status", "budget", "start_date", "target_date",
                "sponsor",
            ],
        }
    }

    /// True if `field` is declared for `entity_type` (base or kind-specific).
    pub fn is_declared(entity_type: EntityType, field: &str) -> bool {
        BASE_FIELDS.contains(&field) || kind_fields(entity_type).contains(&field)
    }
}

/// Free-form extension bag: unknown import fields are routed here in lax
/// mode instead of being silently merged into the schema fields.
pub type ExtraBag = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_30_kinds_are_listed() {
        assert_eq!(EntityType::ALL.len(), 30);
    }

    #[test]
    fn entity_type_round_trips_through_str() {
        for t in EntityType::ALL {
            let parsed: EntityType = t.as_str().parse().unwrap();
            assert_eq!(parsed, t);
        }
        assert!("spaceship".parse::<EntityType>().is_err());
    }

    #[test]
    fn layers_follow_generation_grouping() {
        assert_eq!(EntityType::Location.layer(), 0);
        assert_eq!(EntityType::ThreatActor.layer(), 1);
        assert_eq!(EntityType::System.layer(), 2);
        assert_eq!(EntityType::Person.layer(), 5);
        assert_eq!(EntityType::Initiative.layer(), 11);
    }

    #[test]
    fn kind_tag_matches_discriminant() {
        let kind = EntityKind::ThreatActor(ThreatActor::default());
        assert_eq!(kind.entity_type(), EntityType::ThreatActor);
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["entity_type"], "threat_actor");
    }

    #[test]
    fn catalog_declares_all_mirror_fields() {
        assert!(catalog::is_declared(EntityType::Person, "holds_roles"));
        assert!(catalog::is_declared(EntityType::Role, "filled_by_persons"));
        assert!(catalog::is_declared(EntityType::Role, "headcount_filled"));
        assert!(catalog::is_declared(EntityType::Person, "located_at"));
        assert!(!catalog::is_declared(EntityType::Person, "favorite_color"));
    }

    #[test]
    fn every_kind_has_a_nonempty_catalog_entry() {
        for t in EntityType::ALL {
            assert!(
                !catalog::kind_fields(t).is_empty(),
                "catalog entry for {t} is empty"
            );
        }
    }
}
