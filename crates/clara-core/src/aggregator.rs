//! Risk aggregator: turns findings into a score and a risk tier.
//!
//! Fixed policy:
//! 1. The total score sums positive scores only. Favorable (negative)
//!    findings never offset risk; they are counted separately.
//! 2. Total >= 30 → HIGH
//! 3. Else total >= 15 → MODERATE
//! 4. Else → LOW
//!
//! The recommendation text downstream is keyed to the tier, so these
//! thresholds are constants, not configuration.

use crate::types::{Finding, RiskAssessment, RiskTier};

/// Aggregates findings into a [`RiskAssessment`].
pub struct RiskAggregator;

impl RiskAggregator {
    /// Lowest total score classified as HIGH.
    pub const HIGH_RISK_THRESHOLD: i32 = 30;

    /// Lowest total score classified as MODERATE.
    pub const MODERATE_RISK_THRESHOLD: i32 = 15;

    pub fn new() -> Self {
        Self
    }

    /// Compute total score, favorable count and tier.
    pub fn aggregate(&self, findings: &[Finding]) -> RiskAssessment {
        let total_score = findings
            .iter()
            .map(Finding::score)
            .filter(|score| *score > 0)
            .fold(0i32, i32::saturating_add);

        let favorable_count = findings
            .iter()
            .filter(|f| f.category().is_favorable())
            .count();

        RiskAssessment {
            total_score,
            favorable_count,
            risk_tier: Self::tier_for(total_score),
        }
    }

    /// Tier for a total score. Lower bounds are inclusive.
    pub fn tier_for(total_score: i32) -> RiskTier {
        if total_score >= Self::HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if total_score >= Self::MODERATE_RISK_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self::new()
    }
}
