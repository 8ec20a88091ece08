//! Hand-authored template tables for coordinated field selection.
//!
//! A template bundles every correlated field of an entity: drawing one
//! bundle from the seeded RNG pins name, type, stack, and criticality at
//! once, instead of four independent picks that could contradict each
//! other.

use org_graph_core::types::Severity;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub struct SystemTemplate {
    pub name: &'static str,
    pub system_type: &'static str,
    pub os: &'static [&'static str],
    pub stacks: &'static [&'static [&'static str]],
    pub ports: &'static [u16],
    pub criticality: Severity,
}

pub const SYSTEM_TEMPLATES: &[SystemTemplate] = &[
    SystemTemplate {
        name: "ERP System",
        system_type: "application",
        os: &["Linux", "Windows Server 2022"],
        stacks: &[&["java", "spring", "oracle"], &["java", "spring", "postgresql"]],
        ports: &[443, 8080],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "CRM Platform",
        system_type: "saas",
        os: &["Linux"],
        stacks: &[&["python", "django", "postgresql"], &["java", "spring", "mysql"]],
        ports: &[443],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "HR Portal",
        system_type: "application",
        os: &["Linux", "Windows Server 2022"],
        stacks: &[&[".net", "sql-server", "iis"], &["python", "django", "postgresql"]],
        ports: &[443, 8443],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "Email Server",
        system_type: "server",
        os: &["Windows Server 2022", "Linux"],
        stacks: &[&["exchange", "active-directory"], &["postfix", "dovecot", "linux"]],
        ports: &[25, 443, 993],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "File Server",
        system_type: "server",
        os: &["Windows Server 2022", "Linux"],
        stacks: &[&["smb", "ntfs", "windows"], &["nfs", "zfs", "linux"]],
        ports: &[445, 139],
        criticality: Severity::Medium,
    },
    SystemTemplate {
        name: "Database Server",
        system_type: "database",
        os: &["Linux", "RHEL 9"],
        stacks: &[&["postgresql", "pgbouncer"], &["mysql", "percona"], &["oracle", "asm"]],
        ports: &[5432, 3306],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "Web Application",
        system_type: "application",
        os: &["Linux", "Ubuntu 22.04"],
        stacks: &[&["node", "react", "mongodb"], &["python", "django", "postgresql"]],
        ports: &[80, 443],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "API Gateway",
        system_type: "appliance",
        os: &["Linux"],
        stacks: &[&["kong", "nginx", "lua"], &["envoy", "grpc", "go"]],
        ports: &[443, 8443],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "Load Balancer",
        system_type: "appliance",
        os: &["Linux"],
        stacks: &[&["haproxy", "keepalived"], &["nginx", "lua"]],
        ports: &[80, 443],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "DNS Server",
        system_type: "server",
        os: &["Linux", "RHEL 9"],
        stacks: &[&["bind9", "dnssec"], &["unbound", "nsd"]],
        ports: &[53],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "LDAP/AD Server",
        system_type: "server",
        os: &["Windows Server 2022"],
        stacks: &[&["active-directory", "kerberos", "ldap"]],
        ports: &[389, 636, 88],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "Monitoring System",
        system_type: "application",
        os: &["Linux", "Ubuntu 22.04"],
        stacks: &[&["prometheus", "grafana", "alertmanager"], &["datadog", "agent"]],
        ports: &[9090, 3000],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "Log Aggregator",
        system_type: "application",
        os: &["Linux"],
        stacks: &[&["elasticsearch", "kibana", "logstash"], &["splunk", "forwarder"]],
        ports: &[9200, 5601],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "CI/CD Pipeline",
        system_type: "application",
        os: &["Linux"],
        stacks: &[&["jenkins", "groovy", "docker"], &["gitlab-ci", "docker", "kubernetes"]],
        ports: &[8080, 443],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "Code Repository",
        system_type: "saas",
        os: &["Linux"],
        stacks: &[&["git", "gitlab", "ruby"], &["git", "github", "go"]],
        ports: &[443, 22],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "VPN Gateway",
        system_type: "appliance",
        os: &["Linux"],
        stacks: &[&["openvpn", "pki"], &["wireguard", "ipsec"]],
        ports: &[443, 1194],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "Firewall",
        system_type: "appliance",
        os: &["Linux"],
        stacks: &[&["palo-alto", "pan-os"], &["fortinet", "fortigate"]],
        ports: &[443],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "SIEM",
        system_type: "application",
        os: &["Linux", "RHEL 9"],
        stacks: &[&["splunk", "enterprise-security"], &["elastic", "security", "kibana"]],
        ports: &[8089, 443],
        criticality: Severity::Critical,
    },
    SystemTemplate {
        name: "Backup Server",
        system_type: "server",
        os: &["Linux", "Windows Server 2022"],
        stacks: &[&["veeam", "sql-server"], &["bacula", "postgresql"]],
        ports: &[9392, 443],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "Data Warehouse",
        system_type: "database",
        os: &["Linux"],
        stacks: &[&["snowflake", "sql"], &["redshift", "postgresql"]],
        ports: &[443, 5439],
        criticality: Severity::High,
    },
    SystemTemplate {
        name: "Analytics Platform",
        system_type: "application",
        os: &["Linux"],
        stacks: &[&["tableau", "python"], &["looker", "sql"]],
        ports: &[443, 8088],
        criticality: Severity::Medium,
    },
    SystemTemplate {
        name: "SSO Provider",
        system_type: "saas",
        os: &["Linux"],
        stacks: &[&["okta", "saml", "oidc"], &["azure-ad", "oauth2"]],
        ports: &[443],
        criticality: Severity::Critical,
    },
];

/// Overflow system names by type, used once the coordinated templates are
/// exhausted.
pub const OVERFLOW_SYSTEMS: &[(&str, &[&str])] = &[
    ("server", &["Print Server", "FTP Server", "NTP Server", "Build Server", "Proxy Server"]),
    (
        "application",
        &[
            "Inventory Management",
            "Workflow Engine",
            "Notification Service",
            "Reporting Engine",
            "Document Management",
            "Asset Tracker",
        ],
    ),
    ("database", &["Reporting Database", "Archive Database", "Staging Database", "Replica Database"]),
    ("saas", &["Project Management SaaS", "Survey Platform", "Expense Management", "E-Signature Platform"]),
    ("appliance", &["WAF Appliance", "Email Gateway", "Web Proxy", "Network TAP"]),
];

pub const OVERFLOW_STACKS: &[&[&str]] = &[
    &["python", "flask", "postgresql"],
    &["java", "spring", "mysql"],
    &["node", "express", "mongodb"],
    &["go", "grpc", "redis"],
    &[".net", "sql-server", "iis"],
];

pub const ENVIRONMENTS: &[&str] = &["production", "staging", "development", "test", "dr"];

// ---------------------------------------------------------------------------
// Vulnerabilities
// ---------------------------------------------------------------------------

pub struct VulnTemplate {
    pub name: &'static str,
    pub descriptions: &'static [&'static str],
    pub components: &'static [&'static str],
}

pub const VULN_TEMPLATES: &[VulnTemplate] = &[
    VulnTemplate {
        name: "SQL Injection",
        descriptions: &[
            "SQL injection vulnerability in user input handling",
            "Unsanitized query parameters allow SQL injection",
            "Database query construction vulnerable to injection via form fields",
        ],
        components: &["login form", "search API", "user profile endpoint", "reporting module"],
    },
    VulnTemplate {
        name: "Cross-Site Scripting",
        descriptions: &[
            "Reflected XSS in URL parameter processing",
            "Stored XSS vulnerability in user-generated content",
            "DOM-based XSS through unescaped template rendering",
        ],
        components: &["comment system", "user profile page", "search results", "message rendering"],
    },
    VulnTemplate {
        name: "Remote Code Execution",
        descriptions: &[
            "Remote code execution via deserialization of untrusted data",
            "Command injection enabling arbitrary code execution",
            "Template injection allowing server-side code execution",
        ],
        components: &["API endpoint", "file processing service", "template engine", "webhook processor"],
    },
    VulnTemplate {
        name: "Privilege Escalation",
        descriptions: &[
            "Local privilege escalation through SUID binary exploitation",
            "Vertical privilege escalation via insecure role check",
            "Privilege escalation through misconfigured sudo rules",
        ],
        components: &["authentication module", "role-based access control", "service account handler"],
    },
    VulnTemplate {
        name: "Authentication Bypass",
        descriptions: &[
            "Authentication bypass through token manipulation",
            "Session fixation allowing authentication bypass",
            "Missing authentication check on administrative endpoint",
        ],
        components: &["SSO integration", "API authentication middleware", "JWT validation"],
    },
    VulnTemplate {
        name: "Information Disclosure",
        descriptions: &[
            "Sensitive information disclosed in error messages",
            "Debug endpoint exposing internal system details",
            "Directory listing enabled on web server",
        ],
        components: &["error handler", "debug endpoint", "API response serializer"],
    },
    VulnTemplate {
        name: "Path Traversal",
        descriptions: &[
            "Path traversal allowing access to files outside web root",
            "Directory traversal in file download functionality",
            "Zip slip vulnerability in archive extraction",
        ],
        components: &["file download endpoint", "archive extractor", "static file server"],
    },
    VulnTemplate {
        name: "SSRF",
        descriptions: &[
            "Server-side request forgery via URL parameter manipulation",
            "SSRF enabling access to internal metadata services",
            "Blind SSRF through webhook URL processing",
        ],
        components: &["webhook handler", "URL preview feature", "PDF generator"],
    },
    VulnTemplate {
        name: "Insecure Deserialization",
        descriptions: &[
            "Insecure deserialization of user-controlled data",
            "Object injection through untrusted deserialization",
            "Unsafe unmarshaling of serialized objects",
        ],
        components: &["session handler", "message queue consumer", "cache layer"],
    },
    VulnTemplate {
        name: "Broken Access Control",
        descriptions: &[
            "Horizontal access control bypass via IDOR",
            "Missing function-level access control on admin API",
            "Insecure direct object reference in resource endpoint",
        ],
        components: &["REST API endpoint", "file access handler", "resource controller"],
    },
];

pub const SEVERITIES: &[Severity] = &[
    Severity::Low,
    Severity::Medium,
    Severity::High,
    Severity::Critical,
];

/// CVSS band per severity.
pub fn cvss_range(severity: Severity) -> (f64, f64) {
    match severity {
        Severity::Low => (0.1, 3.9),
        Severity::Medium => (4.0, 6.9),
        Severity::High => (7.0, 8.9),
        Severity::Critical => (9.0, 10.0),
    }
}

// ---------------------------------------------------------------------------
// Threat actors: 12 named APT profiles with hard-coded attribution
// ---------------------------------------------------------------------------

pub struct AptProfile {
    pub name: &'static str,
    pub origin: &'static str,
    pub actor_type: &'static str,
    pub motivation: &'static str,
    pub sophistication: &'static str,
    pub targets: &'static [&'static str],
}

pub const APT_PROFILES: &[AptProfile] = &[
    AptProfile { name: "Midnight Blizzard", origin: "RU", actor_type: "nation_state", motivation: "espionage", sophistication: "advanced", targets: &["technology", "government", "defense"] },
    AptProfile { name: "Cozy Bear", origin: "RU", actor_type: "apt", motivation: "espionage", sophistication: "advanced", targets: &["government", "defense", "healthcare"] },
    AptProfile { name: "Fancy Bear", origin: "RU", actor_type: "nation_state", motivation: "espionage", sophistication: "advanced", targets: &["government", "defense", "energy"] },
    AptProfile { name: "Lazarus Group", origin: "KP", actor_type: "nation_state", motivation: "financial", sophistication: "advanced", targets: &["finance", "technology", "defense"] },
    AptProfile { name: "Equation Group", origin: "US", actor_type: "nation_state", motivation: "espionage", sophistication: "advanced", targets: &["government", "technology", "energy"] },
    AptProfile { name: "Shadow Brokers", origin: "Unknown", actor_type: "hacktivist", motivation: "disruption", sophistication: "high", targets: &["government", "technology"] },
    AptProfile { name: "DarkSide", origin: "RU", actor_type: "cybercriminal", motivation: "financial", sophistication: "high", targets: &["energy", "healthcare", "finance"] },
    AptProfile { name: "REvil", origin: "RU", actor_type: "cybercriminal", motivation: "financial", sophistication: "high", targets: &["technology", "healthcare", "finance"] },
    AptProfile { name: "Sandworm", origin: "RU", actor_type: "nation_state", motivation: "disruption", sophistication: "advanced", targets: &["energy", "government", "technology"] },
    AptProfile { name: "Turla", origin: "RU", actor_type: "apt", motivation: "espionage", sophistication: "advanced", targets: &["government", "defense"] },
    AptProfile { name: "Kimsuky", origin: "KP", actor_type: "nation_state", motivation: "espionage", sophistication: "high", targets: &["government", "defense", "technology"] },
    AptProfile { name: "Charming Kitten", origin: "IR", actor_type: "nation_state", motivation: "espionage", sophistication: "high", targets: &["government", "defense", "technology"] },
];

pub const TTPS: &[&str] = &[
    "T1566-Phishing",
    "T1059-Command Scripting",
    "T1078-Valid Accounts",
    "T1021-Remote Services",
    "T1071-Application Layer Protocol",
    "T1486-Data Encrypted for Impact",
    "T1053-Scheduled Task",
    "T1027-Obfuscated Files",
    "T1105-Ingress Tool Transfer",
    "T1070-Indicator Removal",
];

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

/// (short name, full name, jurisdiction, category)
pub const REGULATIONS: &[(&str, &str, &str, &str)] = &[
    ("GDPR", "General Data Protection Regulation", "EU", "Data Privacy"),
    ("CCPA", "California Consumer Privacy Act", "US-CA", "Data Privacy"),
    ("HIPAA", "Health Insurance Portability and Accountability Act", "US", "Healthcare"),
    ("SOX", "Sarbanes-Oxley Act", "US", "Financial Reporting"),
    ("PCI-DSS", "Payment Card Industry Data Security Standard", "Global", "Payment Security"),
    ("DORA", "Digital Operational Resilience Act", "EU", "Financial Services"),
    ("NIS2", "Network and Information Security Directive 2", "EU", "Cybersecurity"),
    ("SOC2", "Service Organization Control Type 2", "US", "Trust Services"),
    ("ISO27001", "Information Security Management System", "Global", "Information Security"),
    ("GLBA", "Gramm-Leach-Bliley Act", "US", "Financial Privacy"),
    ("NIST-CSF", "NIST Cybersecurity Framework", "US", "Cybersecurity"),
    ("Basel III", "Basel III Capital Adequacy", "Global", "Banking"),
    ("MiFID II", "Markets in Financial Instruments Directive II", "EU", "Financial Markets"),
    ("FISMA", "Federal Information Security Modernization Act", "US", "Government IT"),
];

pub const CONTROL_FRAMEWORKS: &[&str] =
    &["NIST 800-53", "ISO 27001", "CIS Controls", "COBIT", "SOC2 TSC"];
pub const CONTROL_TYPES: &[&str] = &["Preventive", "Detective", "Corrective", "Compensating"];
pub const CONTROL_DOMAINS: &[&str] = &[
    "Access Control",
    "Asset Management",
    "Audit & Accountability",
    "Configuration Management",
    "Incident Response",
    "Physical Security",
    "Risk Assessment",
    "Vulnerability Management",
    "Change Management",
    "Data Protection",
];

pub const RISK_CATEGORIES: &[&str] = &[
    "Operational",
    "Cybersecurity",
    "Compliance",
    "Financial",
    "Strategic",
    "Reputational",
    "Third-Party",
    "Technology",
];

pub const RISK_SCENARIOS: &[&str] = &[
    "ransomware outage of a core platform",
    "regulatory enforcement after a reportable breach",
    "extended cloud-region unavailability",
    "insider exfiltration of customer records",
    "critical vendor insolvency",
    "unpatched perimeter exposure",
    "payment fraud through compromised credentials",
    "data-quality failure in financial reporting",
];

pub const THREAT_CATEGORIES: &[&str] = &[
    "Cyber",
    "Physical",
    "Insider",
    "Supply Chain",
    "Natural Disaster",
    "Geopolitical",
    "Regulatory Change",
];

pub const POLICY_TEMPLATES: &[(&str, &str)] = &[
    ("Acceptable Use Policy", "governance"),
    ("Access Control Policy", "security"),
    ("Data Retention Policy", "data"),
    ("Incident Response Policy", "security"),
    ("Password Policy", "security"),
    ("Remote Work Policy", "hr"),
    ("Vendor Management Policy", "third-party"),
    ("Data Classification Policy", "data"),
    ("Change Management Policy", "operations"),
    ("Encryption Policy", "security"),
    ("Backup & Recovery Policy", "operations"),
    ("Privacy Policy", "data"),
];

pub const INCIDENT_TYPES: &[&str] = &[
    "phishing",
    "malware",
    "unauthorized_access",
    "data_leak",
    "denial_of_service",
    "lost_device",
    "misconfiguration",
];

// ---------------------------------------------------------------------------
// Data layer
// ---------------------------------------------------------------------------

pub const DATA_DOMAIN_NAMES: &[&str] = &[
    "Customer Data",
    "Financial Data",
    "Employee Data",
    "Product Data",
    "Operational Data",
    "Marketing Data",
    "Compliance Data",
    "Clinical Data",
    "Trading Data",
    "Risk Data",
];

pub const DATA_ASSET_TEMPLATES: &[(&str, &str, bool)] = &[
    // (name, asset_type, contains_pii)
    ("Customer Master Records", "database", true),
    ("Payment Transaction Log", "database", true),
    ("Employee Directory", "database", true),
    ("Payroll Records", "database", true),
    ("Product Catalog", "database", false),
    ("Sales Pipeline Export", "file_share", true),
    ("Audit Trail Archive", "archive", false),
    ("Source Code Repository Mirror", "repository", false),
    ("Contract Document Store", "document_store", true),
    ("Marketing Analytics Dataset", "dataset", false),
    ("Clinical Records Extract", "database", true),
    ("Vendor Invoice Archive", "archive", false),
    ("Security Event Archive", "archive", false),
    ("Data Lake Raw Zone", "object_store", true),
];

pub const TRANSFER_METHODS: &[&str] = &["API", "ETL", "File Transfer", "Streaming", "Replication"];
pub const FLOW_FREQUENCIES: &[&str] = &["Real-time", "Hourly", "Daily", "Weekly", "On Demand"];

// ---------------------------------------------------------------------------
// Integrations
// ---------------------------------------------------------------------------

pub const INTEGRATION_TYPES: &[&str] =
    &["API", "ETL", "File Transfer", "Message Queue", "Database Link", "Webhook", "CDC"];
pub const INTEGRATION_PROTOCOLS: &[&str] =
    &["REST", "SOAP", "gRPC", "SFTP", "Kafka", "AMQP", "JDBC"];
pub const DATA_FORMATS: &[&str] = &["JSON", "XML", "CSV", "Avro", "Parquet"];

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

/// Sub-department templates by parent department name, across the tech,
/// financial, and healthcare profiles.
pub const SUB_DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &[
            "Platform Engineering",
            "Product Engineering",
            "Infrastructure",
            "Data Engineering",
            "Mobile Engineering",
            "Frontend Engineering",
            "Backend Engineering",
            "QA & Testing",
            "SRE & Reliability",
            "Security Engineering",
        ],
    ),
    ("Product", &["Product Management", "UX & Design", "Product Analytics", "Technical Writing"]),
    (
        "Sales",
        &["Enterprise Sales", "Mid-Market Sales", "Inside Sales", "Solutions Engineering", "Sales Operations"],
    ),
    (
        "Marketing",
        &["Digital Marketing", "Brand & Communications", "Product Marketing", "Demand Generation"],
    ),
    ("IT Operations", &["Cloud Infrastructure", "Service Desk", "Network Operations", "Database Administration"]),
    (
        "Security",
        &["Security Operations", "GRC", "Threat Intelligence", "Application Security", "Identity & Access Management"],
    ),
    ("HR", &["Talent Acquisition", "Compensation & Benefits", "Learning & Development", "Employee Relations"]),
    ("Finance", &["Financial Planning & Analysis", "Treasury", "Tax", "Accounts Payable & Receivable"]),
    ("Legal", &["Corporate Legal", "Intellectual Property", "Employment Law"]),
    ("Trading", &["Equities Trading", "Fixed Income", "Derivatives", "FX Trading", "Commodities"]),
    (
        "Technology",
        &["Platform Engineering", "Application Development", "Infrastructure & Cloud", "Data Engineering", "DevOps & SRE", "QA & Testing"],
    ),
    ("Risk Management", &["Market Risk", "Credit Risk", "Operational Risk", "Model Risk"]),
    (
        "Compliance & Legal",
        &["Regulatory Compliance", "Legal Affairs", "Privacy & Data Protection", "Anti-Money Laundering"],
    ),
    ("Operations", &["Settlement & Clearing", "Reconciliation", "Client Onboarding", "Middle Office"]),
    ("Client Services", &["Private Banking", "Institutional Services", "Retail Banking", "Wealth Management"]),
    (
        "Finance & Accounting",
        &["Financial Planning & Analysis", "Treasury Operations", "Tax & Compliance", "Accounts & Reporting"],
    ),
    (
        "Information Security",
        &["Security Operations Center", "GRC", "Threat Intelligence", "Application Security", "Identity & Access Management"],
    ),
    ("Internal Audit", &["IT Audit", "Financial Audit", "Operational Audit"]),
    (
        "Clinical Operations",
        &["Emergency Medicine", "Surgical Services", "Outpatient Services", "Inpatient Care", "Diagnostics & Imaging", "Rehabilitation", "Pediatrics", "Cardiology"],
    ),
    (
        "Nursing",
        &["Medical-Surgical Nursing", "ICU & Critical Care", "Emergency Nursing", "Pediatric Nursing", "Obstetrics & Gynecology"],
    ),
    ("Administration", &["Hospital Administration", "Patient Access", "Health Information Management", "Quality Improvement"]),
    ("IT", &["Clinical Systems", "Infrastructure", "Service Desk", "Data & Analytics", "Cybersecurity"]),
    (
        "Finance & Billing",
        &["Revenue Cycle Management", "Claims Processing", "Patient Accounts", "Financial Planning"],
    ),
    ("Pharmacy", &["Inpatient Pharmacy", "Outpatient Pharmacy", "Clinical Pharmacy"]),
    ("Research", &["Clinical Trials", "Basic Research", "Translational Research", "Biostatistics"]),
    ("Compliance", &["Regulatory Compliance", "Privacy (HIPAA)", "Accreditation"]),
    ("Facilities", &["Maintenance & Engineering", "Environmental Services", "Safety & Security"]),
];

pub fn sub_departments_for(parent: &str) -> Option<&'static [&'static str]> {
    SUB_DEPARTMENTS
        .iter()
        .find(|(name, _)| *name == parent)
        .map(|(_, subs)| *subs)
}

/// Role templates by (parent) department name.
pub const ROLE_TEMPLATES: &[(&str, &[&str])] = &[
    ("Engineering", &["Software Engineer", "Tech Lead", "DevOps Engineer", "QA Engineer", "Data Engineer"]),
    ("Product", &["Product Manager", "Product Analyst", "UX Designer"]),
    ("Sales", &["Account Executive", "Sales Manager", "Sales Development Rep"]),
    ("Marketing", &["Marketing Manager", "Content Strategist", "Growth Analyst"]),
    ("HR", &["HR Generalist", "Recruiter", "HR Manager"]),
    ("Finance", &["Financial Analyst", "Controller", "Accountant"]),
    ("Finance & Billing", &["Financial Analyst", "Billing Specialist", "Revenue Analyst"]),
    ("Finance & Accounting", &["Financial Analyst", "Controller", "Accountant"]),
    ("Legal", &["Legal Counsel", "Paralegal", "Compliance Analyst"]),
    ("Compliance & Legal", &["Compliance Officer", "Legal Counsel", "Regulatory Analyst"]),
    ("IT Operations", &["System Administrator", "Network Engineer", "Help Desk Analyst", "Database Administrator"]),
    ("IT", &["System Administrator", "Network Engineer", "Help Desk Analyst", "Cloud Engineer"]),
    ("Technology", &["Software Engineer", "DevOps Engineer", "Cloud Architect", "Data Engineer"]),
    ("Security", &["Security Analyst", "Security Engineer", "SOC Analyst", "CISO"]),
    ("Information Security", &["Security Analyst", "Security Engineer", "SOC Analyst", "Threat Hunter", "CISO"]),
    ("Executive", &["CEO", "CTO", "CFO", "COO"]),
    ("Clinical Operations", &["Clinical Director", "Care Coordinator", "Medical Officer"]),
    ("Nursing", &["Charge Nurse", "Nurse Manager", "Clinical Nurse Specialist"]),
    ("Administration", &["Office Manager", "Administrative Director"]),
    ("Pharmacy", &["Pharmacist", "Pharmacy Manager"]),
    ("Research", &["Research Scientist", "Principal Investigator"]),
    ("Compliance", &["Compliance Officer", "Privacy Officer", "Regulatory Analyst"]),
    ("Facilities", &["Facilities Manager", "Safety Officer"]),
    ("Trading", &["Trader", "Trading Desk Manager", "Quantitative Analyst"]),
    ("Risk Management", &["Risk Analyst", "Risk Manager", "Credit Risk Officer"]),
    ("Operations", &["Operations Analyst", "Operations Manager"]),
    ("Client Services", &["Client Manager", "Relationship Manager"]),
    ("Internal Audit", &["Internal Auditor", "Audit Manager"]),
];

pub const DEFAULT_ROLES: &[&str] = &["Analyst", "Specialist", "Coordinator"];

pub fn roles_for(parent: &str) -> &'static [&'static str] {
    ROLE_TEMPLATES
        .iter()
        .find(|(name, _)| *name == parent)
        .map(|(_, roles)| *roles)
        .unwrap_or(DEFAULT_ROLES)
}

/// Role-name → correlated permission set.
pub const ROLE_PERMISSIONS: &[(&str, &[&str])] = &[
    ("Software Engineer", &["read:internal", "write:internal", "deploy:production", "access:vpn"]),
    ("Tech Lead", &["read:internal", "write:internal", "deploy:production", "approve:changes"]),
    ("DevOps Engineer", &["admin:systems", "deploy:production", "read:internal", "write:internal"]),
    ("QA Engineer", &["read:internal", "write:internal", "access:vpn"]),
    ("Cloud Engineer", &["admin:systems", "deploy:production", "read:internal"]),
    ("Cloud Architect", &["admin:systems", "deploy:production", "approve:changes"]),
    ("Data Engineer", &["read:internal", "read:confidential", "write:internal"]),
    ("Security Analyst", &["read:internal", "read:confidential", "access:vpn"]),
    ("Security Engineer", &["admin:systems", "read:confidential", "read:internal"]),
    ("SOC Analyst", &["read:internal", "read:confidential", "access:vpn"]),
    ("Threat Hunter", &["read:confidential", "read:internal", "access:vpn"]),
    ("CISO", &["admin:systems", "admin:users", "read:confidential", "write:confidential", "approve:changes", "manage:budgets"]),
    ("CEO", &["admin:users", "manage:budgets", "approve:changes", "read:confidential"]),
    ("CTO", &["admin:systems", "admin:users", "deploy:production", "approve:changes"]),
    ("CFO", &["manage:budgets", "read:confidential", "write:confidential", "approve:changes"]),
    ("COO", &["manage:budgets", "approve:changes", "read:confidential"]),
    ("HR Manager", &["admin:users", "read:confidential", "write:confidential"]),
    ("Sales Manager", &["read:internal", "manage:budgets"]),
    ("Marketing Manager", &["read:internal", "write:internal"]),
    ("System Administrator", &["admin:systems", "read:internal", "deploy:production"]),
    ("Network Engineer", &["admin:systems", "read:internal"]),
    ("Database Administrator", &["admin:systems", "read:confidential", "write:confidential"]),
    ("Help Desk Analyst", &["read:internal", "admin:users"]),
];

pub const DEFAULT_PERMISSIONS: &[&str] = &["read:internal", "access:vpn"];

/// Management markers exempting a role from seniority expansion.
pub const SENIORITY_EXEMPT_MARKERS: &[&str] = &[
    "manager", "director", "vp", "chief", "ceo", "cto", "cfo", "coo", "cio", "ciso", "lead",
    "head", "principal", "senior", "junior", "staff", "recruiter", "paralegal", "officer",
];

pub fn permissions_for(role_name: &str) -> &'static [&'static str] {
    ROLE_PERMISSIONS
        .iter()
        .find(|(name, _)| *name == role_name)
        .map(|(_, perms)| *perms)
        .unwrap_or(DEFAULT_PERMISSIONS)
}

pub const OU_TYPES: &[&str] = &[
    "Business Unit",
    "Division",
    "Shared Service Center",
    "Center of Excellence",
];

pub const FUNCTIONAL_DOMAINS: &[&str] = &[
    "Technology",
    "Finance",
    "Operations",
    "Sales",
    "Marketing",
    "HR",
    "Legal",
    "Compliance",
];

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

pub const FIRST_NAMES: &[&str] = &[
    "Ada", "Amir", "Ana", "Andre", "Asha", "Carlos", "Chen", "Dana", "Diego", "Elena", "Emeka",
    "Fatima", "Felix", "Grace", "Hana", "Ibrahim", "Ines", "Ivan", "Jonas", "Julia", "Kai",
    "Keiko", "Lars", "Leila", "Liam", "Lucia", "Marcus", "Maya", "Mei", "Nadia", "Noor", "Omar",
    "Priya", "Rafael", "Rosa", "Sam", "Sofia", "Tomas", "Yara", "Zainab",
];

pub const LAST_NAMES: &[&str] = &[
    "Adeyemi", "Almeida", "Andersson", "Bauer", "Becker", "Chen", "Costa", "Delgado", "Dubois",
    "Fischer", "Garcia", "Haddad", "Hansen", "Ivanova", "Jensen", "Kim", "Kowalski", "Kumar",
    "Larsen", "Lee", "Lindqvist", "Moreau", "Moretti", "Nakamura", "Novak", "Okafor", "Park",
    "Petrov", "Reyes", "Ricci", "Santos", "Sato", "Schmidt", "Silva", "Singh", "Tanaka",
    "Varga", "Wang", "Yamamoto", "Zhang",
];

pub const CLEARANCE_LEVELS: &[&str] = &["none", "basic", "elevated", "privileged", "admin"];

// ---------------------------------------------------------------------------
// Facilities & geography
// ---------------------------------------------------------------------------

pub const CITIES: &[&str] = &[
    "Austin", "Berlin", "Boston", "Chicago", "Denver", "Dublin", "Frankfurt", "Lisbon", "London",
    "Madrid", "Melbourne", "Munich", "New York", "Oslo", "Prague", "Seattle", "Singapore",
    "Stockholm", "Tokyo", "Toronto", "Warsaw", "Zurich",
];

pub const LOCATION_TYPES: &[&str] =
    &["headquarters", "office", "data_center", "warehouse", "remote_hub"];

/// (location type, allowed security levels, capacity range)
pub fn location_profile(location_type: &str) -> (&'static [&'static str], (u32, u32)) {
    match location_type {
        "headquarters" => (&["enhanced", "restricted"], (200, 5000)),
        "data_center" => (&["restricted"], (20, 200)),
        "warehouse" => (&["standard", "enhanced"], (30, 500)),
        "remote_hub" => (&["standard"], (10, 100)),
        _ => (&["standard", "enhanced"], (50, 1500)),
    }
}

pub const SITE_TYPES: &[&str] = &[
    "Headquarters",
    "Regional Office",
    "Data Center",
    "Branch Office",
    "Operations Center",
    "R&D Facility",
];

pub const GEOGRAPHIES: &[(&str, &[&str], &str)] = &[
    ("North America", &["US", "CA"], "CCPA/SOX"),
    ("European Union", &["DE", "FR", "IE", "ES"], "GDPR/NIS2"),
    ("United Kingdom", &["GB"], "UK-GDPR"),
    ("Asia Pacific", &["SG", "JP", "AU"], "PDPA/APPI"),
    ("Latin America", &["BR", "MX"], "LGPD"),
];

pub const JURISDICTIONS: &[(&str, &str, bool)] = &[
    // (code, legal system, data residency required)
    ("US-FED", "common_law", false),
    ("US-CA", "common_law", false),
    ("EU", "civil_law", true),
    ("UK", "common_law", false),
    ("SG", "common_law", true),
    ("JP", "civil_law", true),
];

// ---------------------------------------------------------------------------
// Commercial
// ---------------------------------------------------------------------------

pub const PRODUCT_NAMES: &[&str] = &[
    "Enterprise Platform",
    "Analytics Suite",
    "Mobile App",
    "Customer Portal",
    "Risk Dashboard",
    "Compliance Manager",
    "Trading Platform",
    "Claims Processor",
    "Payment Gateway",
    "API Marketplace",
    "Data Lake Platform",
    "Identity Management",
    "Document Management",
];

pub const PORTFOLIO_NAMES: &[&str] =
    &["Core Platform", "Data & Analytics", "Customer Experience", "Infrastructure Services"];

pub const MARKET_SEGMENTS: &[(&str, &str)] = &[
    ("Enterprise", "Global"),
    ("Mid-Market", "Regional"),
    ("Small Business", "National"),
    ("Public Sector", "National"),
    ("Healthcare Providers", "Regional"),
    ("Financial Institutions", "Global"),
];

pub const CUSTOMER_INDUSTRIES: &[&str] = &[
    "technology",
    "finance",
    "healthcare",
    "retail",
    "manufacturing",
    "government",
    "energy",
];

pub const CUSTOMER_NAME_STEMS: &[&str] = &[
    "Northwind", "Contoso", "Globex", "Initech", "Umbra", "Vandelay", "Stark", "Wayne",
    "Cyberdyne", "Tyrell", "Aperture", "Hooli", "Prestige", "Wonka", "Duff", "Sirius",
    "Monarch", "Pinnacle", "Summit", "Cascade", "Meridian", "Horizon", "Beacon", "Keystone",
];

pub const COMPANY_SUFFIXES: &[&str] = &["Inc", "Group", "Holdings", "Partners", "Labs", "Corp"];

pub const VENDOR_TEMPLATES: &[(&str, &str)] = &[
    // (name, category)
    ("CloudScale Hosting", "infrastructure"),
    ("SecureStack Software", "security"),
    ("DataBridge Analytics", "data"),
    ("NetPulse Telecom", "connectivity"),
    ("HelpFirst Support", "services"),
    ("PayFlow Processing", "payments"),
    ("TalentWorks HR", "hr"),
    ("LegalEdge Counsel", "legal"),
    ("OfficeHub Facilities", "facilities"),
    ("BackupVault Storage", "infrastructure"),
    ("IdentityGate IAM", "security"),
    ("InsightOps Monitoring", "observability"),
    ("ShipRight Logistics", "logistics"),
    ("GreenGrid Energy", "facilities"),
    ("CodeCraft Consulting", "services"),
];

pub const CONTRACT_TYPES: &[&str] =
    &["MSA", "SaaS Subscription", "Support & Maintenance", "Consulting SOW", "License Agreement"];

pub const INITIATIVE_TYPES: &[&str] = &[
    "Digital Transformation",
    "Technology Modernization",
    "Process Improvement",
    "Regulatory Compliance",
    "Security Remediation",
    "Cost Optimization",
    "Customer Experience",
    "Data Governance",
];

pub const INITIATIVE_STATUSES: &[&str] = &[
    "Proposed",
    "Approved",
    "Planning",
    "In Progress",
    "On Hold",
    "Completed",
];

pub const CAPABILITY_NAMES: &[&str] = &[
    "Customer Relationship Management",
    "Financial Planning & Analysis",
    "Human Capital Management",
    "Product Development",
    "Supply Chain Management",
    "Risk Management",
    "Compliance Management",
    "IT Service Management",
    "Data Analytics",
    "Order Management",
    "Procurement",
    "Quality Assurance",
    "Cybersecurity Operations",
    "Business Intelligence",
    "Enterprise Architecture",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_named_apt_profiles() {
        assert_eq!(APT_PROFILES.len(), 12);
        let mut names: Vec<&str> = APT_PROFILES.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn cvss_bands_tile_the_scale() {
        assert_eq!(cvss_range(Severity::Low), (0.1, 3.9));
        assert_eq!(cvss_range(Severity::Critical), (9.0, 10.0));
    }

    #[test]
    fn every_profile_department_has_role_templates_or_default() {
        for dept in [
            "Engineering", "Trading", "Nursing", "Executive", "Facilities",
        ] {
            assert!(!roles_for(dept).is_empty());
        }
        assert_eq!(roles_for("Basket Weaving"), DEFAULT_ROLES);
    }

    #[test]
    fn engineering_subdivides_into_ten_templates() {
        assert_eq!(sub_departments_for("Engineering").unwrap().len(), 10);
        assert!(sub_departments_for("Executive").is_none());
    }
}
