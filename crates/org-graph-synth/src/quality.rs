//! Quality assessor: five structural checks over a generated (or imported)
//! graph, composited into an arithmetic-mean overall score.

use serde::{Deserialize, Serialize};
use tracing::warn;

use org_graph_core::risk::risk_level;
use org_graph_core::types::{EntityKind, EntityType};
use org_graph_engine::GraphEngine;

/// Threshold below which the orchestrator logs a warning (not an error).
pub const QUALITY_WARN_THRESHOLD: f64 = 0.70;

/// Markers of placeholder text that must never appear in descriptions.
const LOREM_MARKERS: &[&str] = &["lorem", "ipsum", "dolor", "sit amet", "consectetur"];

/// Web frameworks that have no business on an appliance.
const WEB_FRAMEWORKS: &[&str] = &["django", "rails", "react", "express", "spring", "flask"];

/// Per-metric scores in `[0, 1]` plus the list of findings behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub overall_score: f64,
    pub risk_math_consistency: f64,
    pub description_quality: f64,
    pub tech_stack_coherence: f64,
    pub field_correlation_score: f64,
    pub encryption_classification_consistency: f64,
    pub warnings: Vec<String>,
}

impl QualityReport {
    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Overall Score: {:.2}", self.overall_score),
            format!("  Risk Math Consistency:     {:.2}", self.risk_math_consistency),
            format!("  Description Quality:       {:.2}", self.description_quality),
            format!("  Tech Stack Coherence:      {:.2}", self.tech_stack_coherence),
            format!("  Field Correlation:         {:.2}", self.field_correlation_score),
            format!(
                "  Encryption/Classification: {:.2}",
                self.encryption_classification_consistency
            ),
        ];
        if !self.warnings.is_empty() {
            lines.push(format!("  Warnings: {}", self.warnings.len()));
            for warning in self.warnings.iter().take(5) {
                lines.push(format!("    - {warning}"));
            }
        }
        lines.join("\n")
    }
}

fn is_lorem(text: &str) -> bool {
    let lower = text.to_lowercase();
    LOREM_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Run all five checks against the engine's current contents.
pub fn assess(engine: &dyn GraphEngine) -> QualityReport {
    let mut warnings = Vec::new();

    let risk_math = check_risk_math(engine, &mut warnings);
    let descriptions = check_descriptions(engine, &mut warnings);
    let tech = check_tech_coherence(engine, &mut warnings);
    let correlation = check_field_correlations(engine, &mut warnings);
    let encryption = check_encryption(engine, &mut warnings);

    let overall =
        (risk_math + descriptions + tech + correlation + encryption) / 5.0;
    if overall < QUALITY_WARN_THRESHOLD {
        warn!(score = overall, "synthetic data quality below threshold");
    }
    QualityReport {
        overall_score: overall,
        risk_math_consistency: risk_math,
        description_quality: descriptions,
        tech_stack_coherence: tech,
        field_correlation_score: correlation,
        encryption_classification_consistency: encryption,
        warnings,
    }
}

fn check_risk_math(engine: &dyn GraphEngine, warnings: &mut Vec<String>) -> f64 {
    let risks = engine.list_entities(Some(EntityType::Risk), None);
    if risks.is_empty() {
        return 1.0;
    }
    let mut correct = 0usize;
    for entity in &risks {
        let EntityKind::Risk(risk) = &entity.kind else {
            continue;
        };
        let expected = risk_level(risk.likelihood, risk.impact);
        if risk.inherent_risk_level == expected
            && risk.residual_risk_level <= risk.inherent_risk_level
        {
            correct += 1;
        } else {
            warnings.push(format!(
                "Risk '{}': level {:?} inconsistent with {:?} x {:?}",
                entity.name, risk.inherent_risk_level, risk.likelihood, risk.impact
            ));
        }
    }
    correct as f64 / risks.len() as f64
}

fn check_descriptions(engine: &dyn GraphEngine, warnings: &mut Vec<String>) -> f64 {
    let mut total = 0usize;
    let mut good = 0usize;
    for entity in engine.list_entities(None, None) {
        if entity.description.is_empty() {
            continue;
        }
        total += 1;
        if is_lorem(&entity.description) {
            warnings.push(format!(
                "{} '{}': placeholder description",
                entity.entity_type(),
                entity.name
            ));
        } else {
            good += 1;
        }
    }
    if total == 0 {
        1.0
    } else {
        good as f64 / total as f64
    }
}

fn check_tech_coherence(engine: &dyn GraphEngine, warnings: &mut Vec<String>) -> f64 {
    let systems = engine.list_entities(Some(EntityType::System), None);
    if systems.is_empty() {
        return 1.0;
    }
    let mut coherent = 0usize;
    for entity in &systems {
        let EntityKind::System(system) = &entity.kind else {
            continue;
        };
        let bad = system.system_type == "appliance"
            && system
                .technologies
                .iter()
                .any(|t| WEB_FRAMEWORKS.contains(&t.as_str()));
        if bad {
            warnings.push(format!(
                "System '{}': appliance carrying a web framework",
                entity.name
            ));
        } else {
            coherent += 1;
        }
    }
    coherent as f64 / systems.len() as f64
}

fn check_field_correlations(engine: &dyn GraphEngine, warnings: &mut Vec<String>) -> f64 {
    let mut checks = 0.0f64;
    let mut passes = 0.0f64;

    // Vulnerability: patch availability should skew status toward closure.
    for entity in engine.list_entities(Some(EntityType::Vulnerability), None) {
        let EntityKind::Vulnerability(vuln) = &entity.kind else {
            continue;
        };
        if vuln.status.is_empty() {
            continue;
        }
        checks += 1.0;
        let consistent = if vuln.patch_available {
            matches!(vuln.status.as_str(), "mitigated" | "resolved" | "open")
        } else {
            matches!(vuln.status.as_str(), "open" | "accepted")
        };
        if consistent {
            passes += 1.0;
        } else {
            passes += 0.5; // unusual but not strictly wrong
        }
    }

    // Site: data centers carry the restricted physical-security tier.
    for entity in engine.list_entities(Some(EntityType::Site), None) {
        let EntityKind::Site(site) = &entity.kind else {
            continue;
        };
        if site.site_type != "Data Center" {
            continue;
        }
        checks += 1.0;
        if site.physical_security_tier == "restricted" {
            passes += 1.0;
        } else {
            warnings.push(format!(
                "Site '{}': data center with '{}' security tier",
                entity.name, site.physical_security_tier
            ));
        }
    }

    if checks == 0.0 {
        1.0
    } else {
        passes / checks
    }
}

fn check_encryption(engine: &dyn GraphEngine, warnings: &mut Vec<String>) -> f64 {
    let flows = engine.list_entities(Some(EntityType::DataFlow), None);
    let mut sensitive = 0usize;
    let mut encrypted = 0usize;
    for entity in &flows {
        let EntityKind::DataFlow(flow) = &entity.kind else {
            continue;
        };
        if !flow.classification.requires_encryption() {
            continue;
        }
        sensitive += 1;
        if flow.encryption_in_transit {
            encrypted += 1;
        } else {
            warnings.push(format!(
                "DataFlow '{}': {} data not encrypted in transit",
                entity.name,
                flow.classification.as_str()
            ));
        }
    }
    if sensitive == 0 {
        1.0
    } else {
        encrypted as f64 / sensitive as f64
    }
}
