//! Shared value enums used across entity kinds.

use serde::{Deserialize, Serialize};

/// Severity / criticality scale shared by vulnerabilities, incidents,
/// systems, and integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Edge weight derived from severity, used by the relationship weaver.
    pub fn weight(self) -> f64 {
        match self {
            Severity::Low => 0.3,
            Severity::Medium => 0.5,
            Severity::High => 0.8,
            Severity::Critical => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Data sensitivity classification for assets, flows, and domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataClassification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl DataClassification {
    /// Classifications that require encryption in transit.
    pub fn requires_encryption(self) -> bool {
        matches!(self, DataClassification::Confidential | DataClassification::Restricted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataClassification::Public => "public",
            DataClassification::Internal => "internal",
            DataClassification::Confidential => "confidential",
            DataClassification::Restricted => "restricted",
        }
    }
}

/// Traversal direction for neighbour and relationship queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
    #[default]
    Both,
}

impl Direction {
    pub fn includes_out(self) -> bool {
        matches!(self, Direction::Out | Direction::Both)
    }

    pub fn includes_in(self) -> bool {
        matches!(self, Direction::In | Direction::Both)
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "both" | "" => Ok(Direction::Both),
            other => Err(format!(
                "Invalid direction '{other}'. Must be 'in', 'out', or 'both'."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_weights_follow_fixed_table() {
        assert_eq!(Severity::Low.weight(), 0.3);
        assert_eq!(Severity::Medium.weight(), 0.5);
        assert_eq!(Severity::High.weight(), 0.8);
        assert_eq!(Severity::Critical.weight(), 1.0);
    }

    #[test]
    fn restricted_and_confidential_require_encryption() {
        assert!(DataClassification::Restricted.requires_encryption());
        assert!(DataClassification::Confidential.requires_encryption());
        assert!(!DataClassification::Internal.requires_encryption());
        assert!(!DataClassification::Public.requires_encryption());
    }

    #[test]
    fn direction_parses_and_defaults_to_both() {
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("".parse::<Direction>().unwrap(), Direction::Both);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
