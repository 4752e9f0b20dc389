//! Report composer: assembles the analysis result and renders the
//! plain-text report.
//!
//! The report layout is fixed:
//!
//! ```text
//! header
//! ======
//! analysis date
//! contract summary (5 fields)
//! total score
//! risk tier
//! one "- <message> (<score> pts): <explanation>" line per finding
//! final recommendation
//! disclaimer
//! ```
//!
//! Placeholders for missing summary fields are produced here and nowhere
//! else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::{AnalysisResult, ContractSummary, ContractType, Finding, RiskAssessment, RiskTier};

/// Language of rendered text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Brazilian Portuguese, the default report language
    #[default]
    PtBr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Ok(Locale::PtBr),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(format!("Unknown locale: {} (expected pt-br or en)", other)),
        }
    }
}

/// Fixed strings for one locale.
struct Labels {
    header: &'static str,
    date: &'static str,
    date_format: &'static str,
    summary_heading: &'static str,
    contract_type: &'static str,
    counterparty_a: &'static str,
    counterparty_b: &'static str,
    amount: &'static str,
    duration: &'static str,
    total_score: &'static str,
    points: &'static str,
    risk_tier: &'static str,
    clauses_heading: &'static str,
    no_clauses: &'static str,
    recommendation_heading: &'static str,
    disclaimer: &'static str,
    not_identified: &'static str,
    amount_not_specified: &'static str,
    duration_not_specified: &'static str,
}

const PT_BR: Labels = Labels {
    header: "RELATÓRIO DE ANÁLISE DE CONTRATO - CLARA",
    date: "Data da Análise",
    date_format: "%d/%m/%Y %H:%M",
    summary_heading: "RESUMO DO CONTRATO:",
    contract_type: "Tipo de Contrato",
    counterparty_a: "Contratante",
    counterparty_b: "Contratada",
    amount: "Valor Total",
    duration: "Duração",
    total_score: "PONTUAÇÃO TOTAL",
    points: "pontos",
    risk_tier: "NÍVEL DE RISCO",
    clauses_heading: "CLÁUSULAS IDENTIFICADAS:",
    no_clauses: "Nenhuma cláusula identificada.",
    recommendation_heading: "RECOMENDAÇÃO FINAL:",
    disclaimer: "Observação: Este relatório é gerado automaticamente e não substitui consulta jurídica profissional.",
    not_identified: "Não identificado",
    amount_not_specified: "Não especificado",
    duration_not_specified: "Não especificada",
};

const EN: Labels = Labels {
    header: "CONTRACT ANALYSIS REPORT - CLARA",
    date: "Analysis date",
    date_format: "%Y-%m-%d %H:%M UTC",
    summary_heading: "CONTRACT SUMMARY:",
    contract_type: "Contract type",
    counterparty_a: "First party",
    counterparty_b: "Second party",
    amount: "Total value",
    duration: "Duration",
    total_score: "TOTAL SCORE",
    points: "points",
    risk_tier: "RISK TIER",
    clauses_heading: "IDENTIFIED CLAUSES:",
    no_clauses: "No clauses identified.",
    recommendation_heading: "FINAL RECOMMENDATION:",
    disclaimer: "Note: This report is generated automatically and does not replace professional legal advice.",
    not_identified: "not identified",
    amount_not_specified: "not specified",
    duration_not_specified: "not specified",
};

impl Locale {
    fn labels(&self) -> &'static Labels {
        match self {
            Locale::PtBr => &PT_BR,
            Locale::En => &EN,
        }
    }

    /// Display label for a risk tier, without markup.
    pub fn tier_label(&self, tier: RiskTier) -> &'static str {
        match (self, tier) {
            (Locale::PtBr, RiskTier::High) => "ALTO RISCO",
            (Locale::PtBr, RiskTier::Moderate) => "RISCO MODERADO",
            (Locale::PtBr, RiskTier::Low) => "BAIXO RISCO",
            (Locale::En, RiskTier::High) => "HIGH RISK",
            (Locale::En, RiskTier::Moderate) => "MODERATE RISK",
            (Locale::En, RiskTier::Low) => "LOW RISK",
        }
    }

    /// Fixed recommendation for a tier.
    pub fn tier_recommendation(&self, tier: RiskTier) -> &'static str {
        match (self, tier) {
            (Locale::PtBr, RiskTier::High) => "⚠️ Contrato com múltiplas cláusulas abusivas. Recomendamos NÃO ASSINAR e consultar um advogado para revisão completa.",
            (Locale::PtBr, RiskTier::Moderate) => "🔍 Contrato com algumas cláusulas problemáticas. Recomendamos negociar alterações antes de assinar.",
            (Locale::PtBr, RiskTier::Low) => "✅ Contrato parece razoável, mas revise cuidadosamente as observações abaixo.",
            (Locale::En, RiskTier::High) => "⚠️ Contract with multiple abusive clauses. We recommend NOT SIGNING and consulting a lawyer for a full review.",
            (Locale::En, RiskTier::Moderate) => "🔍 Contract with some problematic clauses. We recommend negotiating changes before signing.",
            (Locale::En, RiskTier::Low) => "✅ Contract looks reasonable, but review the notes below carefully.",
        }
    }

    /// Message used when no rule matched at all.
    pub fn all_clear(&self) -> &'static str {
        match self {
            Locale::PtBr => "🎉 Nenhuma cláusula problemática foi identificada com as regras atuais!\n\
                \n\
                Recomendamos ainda:\n\
                - Ler todo o contrato atentamente\n\
                - Verificar se todas as promessas verbais estão no documento\n\
                - Confirmar prazos e valores",
            Locale::En => "🎉 No problematic clause was identified with the current rules!\n\
                \n\
                We still recommend:\n\
                - Reading the whole contract carefully\n\
                - Checking that every verbal promise is in the document\n\
                - Confirming deadlines and amounts",
        }
    }

    /// Final recommendation for a result: the all-clear message when
    /// nothing matched, otherwise the tier recommendation.
    pub fn recommendation_for(&self, result: &AnalysisResult) -> &'static str {
        if result.has_findings() {
            self.tier_recommendation(result.risk_tier)
        } else {
            self.all_clear()
        }
    }

    pub fn contract_type_label(&self, contract_type: ContractType) -> &'static str {
        match (self, contract_type) {
            (Locale::PtBr, ContractType::Generic) => "Contrato Genérico",
            (Locale::PtBr, ContractType::Educational) => "Contrato Educacional",
            (Locale::PtBr, ContractType::Lease) => "Contrato de Locação",
            (Locale::PtBr, ContractType::ServicesProvision) => "Contrato de Prestação de Serviços",
            (Locale::En, ContractType::Generic) => "Generic contract",
            (Locale::En, ContractType::Educational) => "Educational services contract",
            (Locale::En, ContractType::Lease) => "Lease contract",
            (Locale::En, ContractType::ServicesProvision) => "Services provision contract",
        }
    }
}

/// Builds [`AnalysisResult`] values and renders them as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportComposer {
    locale: Locale,
}

impl ReportComposer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Assemble the terminal result of one analysis.
    pub fn compose(
        summary: ContractSummary,
        findings: Vec<Finding>,
        assessment: RiskAssessment,
        analyzed_at: DateTime<Utc>,
    ) -> AnalysisResult {
        AnalysisResult {
            findings,
            total_score: assessment.total_score,
            favorable_count: assessment.favorable_count,
            risk_tier: assessment.risk_tier,
            summary,
            analyzed_at,
        }
    }

    /// Render the five summary fields, one `Label: value` per line.
    pub fn render_summary(&self, summary: &ContractSummary) -> String {
        let labels = self.locale.labels();
        let mut out = String::new();

        let fields = [
            (
                labels.contract_type,
                self.locale.contract_type_label(summary.contract_type),
            ),
            (
                labels.counterparty_a,
                summary.counterparty_a.as_deref().unwrap_or(labels.not_identified),
            ),
            (
                labels.counterparty_b,
                summary.counterparty_b.as_deref().unwrap_or(labels.not_identified),
            ),
            (
                labels.amount,
                summary.amount.as_deref().unwrap_or(labels.amount_not_specified),
            ),
            (
                labels.duration,
                summary.duration.as_deref().unwrap_or(labels.duration_not_specified),
            ),
        ];

        for (label, value) in fields {
            push_line(&mut out, &format!("{}: {}", label, value));
        }
        out
    }

    /// One report line for a finding.
    pub fn render_finding(&self, finding: &Finding) -> String {
        format!(
            "- {} ({} pts): {}",
            finding.rule.message, finding.rule.score, finding.rule.explanation
        )
    }

    /// Render the full plain-text report.
    pub fn render(&self, result: &AnalysisResult) -> String {
        let labels = self.locale.labels();
        let mut out = String::new();

        push_line(&mut out, labels.header);
        push_line(&mut out, &"=".repeat(labels.header.chars().count()));
        out.push('\n');
        push_line(
            &mut out,
            &format!("{}: {}", labels.date, result.analyzed_at.format(labels.date_format)),
        );
        out.push('\n');

        push_heading(&mut out, labels.summary_heading);
        out.push_str(&self.render_summary(&result.summary));
        out.push('\n');

        push_line(
            &mut out,
            &format!("{}: {} {}", labels.total_score, result.total_score, labels.points),
        );
        push_line(
            &mut out,
            &format!("{}: {}", labels.risk_tier, self.locale.tier_label(result.risk_tier)),
        );
        out.push('\n');

        push_heading(&mut out, labels.clauses_heading);
        if result.findings.is_empty() {
            push_line(&mut out, labels.no_clauses);
        }
        for finding in &result.findings {
            push_line(&mut out, &self.render_finding(finding));
        }
        out.push('\n');

        push_heading(&mut out, labels.recommendation_heading);
        push_line(&mut out, self.locale.recommendation_for(result));
        out.push('\n');

        push_line(&mut out, labels.disclaimer);
        out
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_heading(out: &mut String, heading: &str) {
    push_line(out, heading);
    push_line(out, &"-".repeat(heading.chars().count()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleDefinition;
    use crate::types::Category;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    fn finding(message: &str, score: i32, category: Category) -> Finding {
        Finding {
            rule: RuleDefinition {
                id: message.to_lowercase(),
                pattern: "x".to_string(),
                message: message.to_string(),
                explanation: format!("{} explanation", message),
                score,
                category,
                recommendation: String::new(),
            },
            context: String::new(),
        }
    }

    fn result_with(findings: Vec<Finding>, total_score: i32, tier: RiskTier) -> AnalysisResult {
        let favorable_count = findings.iter().filter(|f| f.category().is_favorable()).count();
        ReportComposer::compose(
            ContractSummary::default(),
            findings,
            RiskAssessment {
                total_score,
                favorable_count,
                risk_tier: tier,
            },
            fixed_time(),
        )
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_report_layout() {
        let result = result_with(vec![finding("Foro", 15, Category::Abusive)], 15, RiskTier::Moderate);
        let report = ReportComposer::new(Locale::En).render(&result);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "CONTRACT ANALYSIS REPORT - CLARA");
        assert_eq!(lines[1], "=".repeat(lines[0].len()));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Analysis date: 2025-03-14 09:30 UTC");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "CONTRACT SUMMARY:");
        assert_eq!(lines[6], "-".repeat("CONTRACT SUMMARY:".len()));
        assert_eq!(lines[7], "Contract type: Generic contract");
        assert_eq!(lines[11], "Duration: not specified");
        assert_eq!(lines[12], "");
        assert_eq!(lines[13], "TOTAL SCORE: 15 points");
        assert_eq!(lines[14], "RISK TIER: MODERATE RISK");
        assert_eq!(lines[15], "");
        assert_eq!(lines[16], "IDENTIFIED CLAUSES:");
        assert_eq!(lines[18], "- Foro (15 pts): Foro explanation");
        assert!(report.ends_with("professional legal advice.\n"));
    }

    #[test]
    fn test_empty_result_renders_all_clear() {
        let report = ReportComposer::default().render(&result_with(vec![], 0, RiskTier::Low));

        assert!(report.starts_with("RELATÓRIO DE ANÁLISE DE CONTRATO - CLARA\n"));
        assert!(report.contains("Data da Análise: 14/03/2025 09:30"));
        assert!(report.contains("Tipo de Contrato: Contrato Genérico"));
        assert!(report.contains("Contratante: Não identificado"));
        assert!(report.contains("Contratada: Não identificado"));
        assert!(report.contains("Valor Total: Não especificado"));
        assert!(report.contains("Duração: Não especificada"));
        assert!(report.contains("PONTUAÇÃO TOTAL: 0 pontos"));
        assert!(report.contains("NÍVEL DE RISCO: BAIXO RISCO"));
        assert!(report.contains("Nenhuma cláusula identificada."));
        assert!(report.contains("Nenhuma cláusula problemática foi identificada"));
        assert!(report.contains("Confirmar prazos e valores"));
        assert!(report.trim_end().ends_with("não substitui consulta jurídica profissional."));
    }

    #[test]
    fn test_finding_lines_in_order() {
        let result = result_with(
            vec![
                finding("Foro", 15, Category::Abusive),
                finding("Arrependimento", -5, Category::Favorable),
            ],
            15,
            RiskTier::Moderate,
        );
        let report = ReportComposer::default().render(&result);

        let foro = report.find("- Foro (15 pts): Foro explanation").unwrap();
        let arrependimento = report
            .find("- Arrependimento (-5 pts): Arrependimento explanation")
            .unwrap();
        assert!(foro < arrependimento);
        assert!(report.contains("NÍVEL DE RISCO: RISCO MODERADO"));
        assert!(report.contains(Locale::PtBr.tier_recommendation(RiskTier::Moderate)));
        assert!(!report.contains("Nenhuma cláusula"));
    }

    #[test]
    fn test_favorable_only_uses_low_recommendation() {
        let result = result_with(
            vec![finding("Arrependimento", -5, Category::Favorable)],
            0,
            RiskTier::Low,
        );
        assert_eq!(
            Locale::PtBr.recommendation_for(&result),
            "✅ Contrato parece razoável, mas revise cuidadosamente as observações abaixo."
        );
    }

    #[test]
    fn test_tier_text_has_no_markup() {
        for tier in [RiskTier::Low, RiskTier::Moderate, RiskTier::High] {
            for locale in [Locale::PtBr, Locale::En] {
                assert!(!locale.tier_label(tier).contains('<'));
            }
        }
    }

    #[test]
    fn test_high_recommendation_verbatim() {
        assert_eq!(
            Locale::PtBr.tier_recommendation(RiskTier::High),
            "⚠️ Contrato com múltiplas cláusulas abusivas. Recomendamos NÃO ASSINAR e consultar um advogado para revisão completa."
        );
    }

    #[test]
    fn test_english_sentinels() {
        let composer = ReportComposer::new(Locale::En);
        let summary = composer.render_summary(&ContractSummary::default());
        assert_eq!(
            summary,
            "Contract type: Generic contract\n\
             First party: not identified\n\
             Second party: not identified\n\
             Total value: not specified\n\
             Duration: not specified\n"
        );
    }

    #[test]
    fn test_summary_renders_extracted_values() {
        let summary = ContractSummary {
            contract_type: ContractType::Lease,
            counterparty_a: Some("Ana".to_string()),
            counterparty_b: Some("Imobiliária Sol".to_string()),
            amount: Some("R$ 2.300,00".to_string()),
            duration: Some("30 meses".to_string()),
        };
        let rendered = ReportComposer::default().render_summary(&summary);
        assert!(rendered.contains("Tipo de Contrato: Contrato de Locação"));
        assert!(rendered.contains("Contratante: Ana"));
        assert!(rendered.contains("Contratada: Imobiliária Sol"));
        assert!(rendered.contains("Valor Total: R$ 2.300,00"));
        assert!(rendered.contains("Duração: 30 meses"));
    }

    #[test]
    fn test_headings_are_underlined() {
        let report = ReportComposer::new(Locale::En).render(&result_with(vec![], 0, RiskTier::Low));
        assert!(report.contains("CONTRACT SUMMARY:\n-----------------\n"));
        assert!(report.contains("Analysis date: 2025-03-14 09:30 UTC"));
    }
}
