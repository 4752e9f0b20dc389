//! # clara-core
//!
//! Deterministic risk screening of contract text.
//!
//! This crate scans a contract against a catalog of clause patterns and
//! answers:
//! - Which abusive or favorable clauses does it contain?
//! - How risky is it overall?
//! - Who are the parties, what is the value, how long does it run?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same text and catalog always produce the same findings
//! 2. **Linear-time matching**: Patterns run on the `regex` engine, no backtracking
//! 3. **Total**: Analysis never fails; missing fields are `None`, not errors
//! 4. **Shareable**: A compiled catalog is immutable and can be shared across threads
//!
//! It is a heuristic screen, not a legal-compliance verifier.
//!
//! ## Example
//!
//! ```rust,ignore
//! use clara_core::{analyze, Locale, ReportComposer, RiskTier};
//!
//! let result = analyze("O aluno não poderá cancelar em qualquer hipótese.");
//! assert_eq!(result.risk_tier, RiskTier::Moderate);
//! println!("{}", ReportComposer::new(Locale::PtBr).render(&result));
//! ```

pub mod aggregator;
pub mod catalog;
pub mod matcher;
pub mod report;
pub mod summarizer;
pub mod types;

// Re-export main types at crate root
pub use aggregator::RiskAggregator;
pub use catalog::{CatalogError, Rule, RuleCatalog, RuleDefinition};
pub use matcher::{context_snippet, ClauseMatcher};
pub use report::{Locale, ReportComposer};
pub use summarizer::summarize;
pub use types::{
    AnalysisResult, Category, CategoryCounts, ContractSummary, ContractType, Finding,
    RiskAssessment, RiskTier,
};

use chrono::{DateTime, Utc};

/// Analyze contract text with the built-in catalog.
///
/// # Determinism
///
/// This function uses the current system time for `analyzed_at`.
/// For fully deterministic results use [`analyze_at`].
pub fn analyze(text: &str) -> AnalysisResult {
    analyze_at(text, Utc::now())
}

/// Analyze with the built-in catalog and an explicit timestamp.
pub fn analyze_at(text: &str, analyzed_at: DateTime<Utc>) -> AnalysisResult {
    analyze_with_catalog_at(RuleCatalog::seed(), text, analyzed_at)
}

/// Analyze with a caller-provided catalog.
pub fn analyze_with_catalog(catalog: &RuleCatalog, text: &str) -> AnalysisResult {
    analyze_with_catalog_at(catalog, text, Utc::now())
}

/// Analyze with a caller-provided catalog and an explicit timestamp.
///
/// This function is fully deterministic: same inputs always produce the
/// same output.
pub fn analyze_with_catalog_at(
    catalog: &RuleCatalog,
    text: &str,
    analyzed_at: DateTime<Utc>,
) -> AnalysisResult {
    // Independent passes over the same text
    let summary = summarize(text);
    let findings = ClauseMatcher::new(catalog).scan(text);

    let assessment = RiskAggregator::new().aggregate(&findings);

    tracing::info!(
        findings = findings.len(),
        total_score = assessment.total_score,
        favorable = assessment.favorable_count,
        tier = %assessment.risk_tier,
        "Contract analyzed"
    );

    ReportComposer::compose(summary, findings, assessment, analyzed_at)
}


/// End-to-end scenarios across matcher, summarizer, aggregator and report.
#[cfg(test)]
mod scenario_tests {
    use super::*;
    use chrono::TimeZone;

    const CANCELLATION: &str = "O aluno não poderá cancelar em qualquer hipótese.";
    const FOREIGN_FORUM: &str = "Fica eleito o foro de Luxemburgo para dirimir quaisquer dúvidas.";
    const WITHDRAWAL: &str = "Fica assegurado o direito ao arrependimento.";

    const FULL_CONTRACT: &str = "\
CONTRATO DE PRESTAÇÃO DE SERVIÇOS EDUCACIONAIS

CONTRATANTE: Maria da Silva
CONTRATADA: Escola Exemplo Ltda.

CLÁUSULAS:
1. O valor total do curso é de R$ 12.500,00 divididos em parcelas.
2. A duração do curso será de 18 meses.
3. O aluno não poderá cancelar o contrato em qualquer hipótese.
4. A multa por atraso será de 20% sobre a parcela.
5. Fica eleito o foro de Luxemburgo.
6. Fica assegurado o direito ao arrependimento.
";

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_cancellation_only_is_moderate() {
        let result = analyze_at(CANCELLATION, fixed_time());

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].category(), Category::Abusive);
        assert_eq!(result.findings[0].score(), 15);
        assert_eq!(result.total_score, 15);
        assert_eq!(result.risk_tier, RiskTier::Moderate);
    }

    #[test]
    fn test_cancellation_and_foreign_forum_is_high() {
        let text = format!("{}\n{}", CANCELLATION, FOREIGN_FORUM);
        let result = analyze_at(&text, fixed_time());

        assert_eq!(result.total_score, 30);
        assert_eq!(result.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_empty_text() {
        let result = analyze_at("", fixed_time());

        assert!(result.findings.is_empty());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.favorable_count, 0);
        assert_eq!(result.risk_tier, RiskTier::Low);
        assert_eq!(result.summary, ContractSummary::default());

        let report = ReportComposer::new(Locale::En).render(&result);
        assert!(report.contains("First party: not identified"));
        assert!(report.contains("Total value: not specified"));
        assert!(report.contains("No problematic clause was identified"));
    }

    #[test]
    fn test_withdrawal_only_does_not_add_risk() {
        let result = analyze_at(WITHDRAWAL, fixed_time());

        assert_eq!(result.total_score, 0);
        assert_eq!(result.risk_tier, RiskTier::Low);
        assert_eq!(result.favorable_count, 1);
        assert_eq!(result.favorable().count(), 1);
        assert_eq!(result.problematic().count(), 0);
    }

    #[test]
    fn test_repeated_clause_never_lowers_score() {
        let once = analyze_at(CANCELLATION, fixed_time());
        let twice = analyze_at(&format!("{}\n{}", CANCELLATION, CANCELLATION), fixed_time());

        assert!(twice.total_score >= once.total_score);
        assert_eq!(twice.findings.len(), 2);
        assert_eq!(twice.total_score, 30);
    }

    #[test]
    fn test_full_contract() {
        let result = analyze_at(FULL_CONTRACT, fixed_time());

        let ids: Vec<&str> = result.findings.iter().map(|f| f.rule.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "cancellation_prohibited",
                "excessive_penalty",
                "foreign_jurisdiction",
                "withdrawal_right",
            ]
        );
        assert_eq!(result.total_score, 15 + 12 + 15);
        assert_eq!(result.risk_tier, RiskTier::High);
        assert_eq!(result.favorable_count, 1);

        let counts = result.category_counts();
        assert_eq!(counts.abusive, 3);
        assert_eq!(counts.potential, 0);
        assert_eq!(counts.favorable, 1);
        assert_eq!(counts.total(), result.findings.len());

        assert_eq!(result.summary.contract_type, ContractType::Educational);
        assert_eq!(result.summary.counterparty_a.as_deref(), Some("Maria da Silva"));
        assert_eq!(result.summary.counterparty_b.as_deref(), Some("Escola Exemplo Ltda."));
        assert_eq!(result.summary.amount.as_deref(), Some("R$ 12.500,00"));
        assert_eq!(result.summary.duration.as_deref(), Some("18 meses"));

        let report = ReportComposer::default().render(&result);
        assert!(report.contains("PONTUAÇÃO TOTAL: 42 pontos"));
        assert!(report.contains("NÍVEL DE RISCO: ALTO RISCO"));
        assert!(report.contains("- Proibição Total de Cancelamento (15 pts): "));
        assert!(report.contains("- Direito ao Arrependimento (-5 pts): "));
        assert!(report.contains("Recomendamos NÃO ASSINAR"));
    }

    #[test]
    fn test_determinism_same_input_same_output() {
        let result1 = analyze_at(FULL_CONTRACT, fixed_time());
        let result2 = analyze_at(FULL_CONTRACT, fixed_time());

        assert_eq!(result1.findings, result2.findings);
        assert_eq!(result1.total_score, result2.total_score);
        assert_eq!(result1.summary, result2.summary);

        let composer = ReportComposer::default();
        assert_eq!(composer.render(&result1), composer.render(&result2));
    }

    #[test]
    fn test_context_snippet_in_findings() {
        let padding = "Texto introdutório do contrato com várias palavras. ";
        let text = format!("{}{}{}", padding, FOREIGN_FORUM, padding);
        let result = analyze_at(&text, fixed_time());

        assert_eq!(result.findings.len(), 1);
        let context = &result.findings[0].context;
        assert!(context.starts_with("..."));
        assert!(context.ends_with("..."));
        assert!(context.contains("foro de Luxemburgo"));
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = analyze_at(CANCELLATION, fixed_time());
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"risk_tier\":\"MODERATE\""));
        assert!(json.contains("\"category\":\"abusive\""));
        assert!(json.contains("2025-12-20"));
    }
}
