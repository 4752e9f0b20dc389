//! Core types for Clara analysis.
//!
//! These types are the data structures shared by the matcher, the
//! summarizer, the aggregator and the report composer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::RuleDefinition;

/// Category of a catalog rule.
///
/// Catalog files may use either the English names or their Portuguese
/// spellings (`abusiva`, `potencial`, `favoravel`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Clause considered abusive under consumer law
    #[serde(alias = "abusiva")]
    Abusive,

    /// Clause that may be problematic depending on context
    #[serde(alias = "potencial")]
    Potential,

    /// Clause that protects the consumer
    #[serde(alias = "favoravel", alias = "favorável")]
    Favorable,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Abusive => "abusive",
            Category::Potential => "potential",
            Category::Favorable => "favorable",
        }
    }

    pub fn is_favorable(&self) -> bool {
        matches!(self, Category::Favorable)
    }
}

/// Coarse risk classification derived from the aggregate positive score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract classification, detected from marker vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    #[default]
    Generic,
    Educational,
    Lease,
    ServicesProvision,
}

/// Identifying fields extracted from the raw contract text.
///
/// Fields that could not be located are `None`; the human-readable
/// placeholders are produced by the report renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContractSummary {
    pub contract_type: ContractType,

    /// First party ("CONTRATANTE")
    pub counterparty_a: Option<String>,

    /// Second party ("CONTRATADA")
    pub counterparty_b: Option<String>,

    /// Currency-prefixed amount as written, e.g. "R$ 1.500,00"
    pub amount: Option<String>,

    /// Number and unit as written, e.g. "12 meses"
    pub duration: Option<String>,
}

/// One match occurrence of a catalog rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    /// The originating rule, copied by value
    pub rule: RuleDefinition,

    /// Text surrounding the match, for human review
    pub context: String,
}

impl Finding {
    pub fn score(&self) -> i32 {
        self.rule.score
    }

    pub fn category(&self) -> Category {
        self.rule.category
    }
}

/// Aggregate figures computed over a list of findings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Sum of the positive scores only
    pub total_score: i32,

    /// Number of findings in the favorable category
    pub favorable_count: usize,

    pub risk_tier: RiskTier,
}

/// Number of findings per category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    pub abusive: usize,
    pub potential: usize,
    pub favorable: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.abusive + self.potential + self.favorable
    }
}

/// Result of analyzing one contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Findings in catalog order, then left-to-right within a rule
    pub findings: Vec<Finding>,

    pub total_score: i32,

    pub favorable_count: usize,

    pub risk_tier: RiskTier,

    pub summary: ContractSummary,

    /// When the analysis occurred
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Findings that are not in the favorable category.
    pub fn problematic(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.category().is_favorable())
    }

    /// Findings in the favorable category.
    pub fn favorable(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.category().is_favorable())
    }

    /// Distribution of findings across the three categories.
    pub fn category_counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for finding in &self.findings {
            match finding.category() {
                Category::Abusive => counts.abusive += 1,
                Category::Potential => counts.potential += 1,
                Category::Favorable => counts.favorable += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_portuguese_aliases() {
        let parsed: Vec<Category> =
            serde_json::from_str(r#"["abusiva", "potencial", "favoravel", "favorable"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Category::Abusive,
                Category::Potential,
                Category::Favorable,
                Category::Favorable
            ]
        );
    }

    #[test]
    fn test_risk_tier_serializes_uppercase() {
        let json = serde_json::to_string(&RiskTier::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
        assert_eq!(RiskTier::High.to_string(), "HIGH");
    }

    #[test]
    fn test_risk_tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }

    #[test]
    fn test_summary_default_is_all_absent() {
        let summary = ContractSummary::default();
        assert_eq!(summary.contract_type, ContractType::Generic);
        assert!(summary.counterparty_a.is_none());
        assert!(summary.counterparty_b.is_none());
        assert!(summary.amount.is_none());
        assert!(summary.duration.is_none());
    }
}
