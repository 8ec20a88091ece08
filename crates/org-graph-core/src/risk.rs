//! Risk level scale and the fixed likelihood × impact matrix.
//!
//! Every generated or imported `risk` entity must satisfy
//! `inherent_risk_level == RISK_MATRIX[likelihood][impact]` and
//! `residual_risk_level <= inherent_risk_level` in the enum ordering.

use serde::{Deserialize, Serialize};

/// Five-point ordered risk scale used for likelihood, impact, and levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryLow,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "very_low",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    /// Step down `delta` levels, saturating at the bottom of the scale.
    pub fn reduced_by(self, delta: u8) -> RiskLevel {
        let idx = (self as usize).saturating_sub(delta as usize);
        RiskLevel::ALL[idx]
    }
}

/// The fixed 5×5 risk matrix, indexed `[likelihood][impact]`.
///
/// Rows and columns run very_low → very_high. The table is deliberately
/// asymmetric toward impact: a very-high-impact event is rated at least
/// medium even when unlikely.
pub const RISK_MATRIX: [[RiskLevel; 5]; 5] = {
    use RiskLevel::{High, Low, Medium, VeryHigh, VeryLow};
    [
        // likelihood = very_low
        [VeryLow, VeryLow, Low, Medium, Medium],
        // likelihood = low
        [VeryLow, Low, Low, Medium, High],
        // likelihood = medium
        [Low, Low, Medium, High, High],
        // likelihood = high
        [Medium, Medium, High, High, VeryHigh],
        // likelihood = very_high
        [Medium, High, High, VeryHigh, VeryHigh],
    ]
};

/// Look up the risk level for a `(likelihood, impact)` pair.
pub fn risk_level(likelihood: RiskLevel, impact: RiskLevel) -> RiskLevel {
    RISK_MATRIX[likelihood as usize][impact as usize]
}
