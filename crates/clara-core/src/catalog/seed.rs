//! Built-in rule catalog.
//!
//! Patterns target Brazilian consumer contracts and cite the Consumer
//! Defense Code (CDC). Each entry is plain data; the table is compiled once
//! on first use and shared read-only afterwards.
//!
//! | ID | Category | Score |
//! |----|----------|-------|
//! | `cancellation_prohibited` | abusive | +15 |
//! | `silent_auto_renewal` | abusive | +10 |
//! | `excessive_penalty` | abusive | +12 |
//! | `liability_waiver` | abusive | +15 |
//! | `foreign_jurisdiction` | abusive | +15 |
//! | `withdrawal_right` | favorable | -5 |

use lazy_static::lazy_static;

use super::rule::{RuleCatalog, RuleDefinition};
use crate::types::Category;

struct SeedRule {
    id: &'static str,
    pattern: &'static str,
    message: &'static str,
    explanation: &'static str,
    score: i32,
    category: Category,
    recommendation: &'static str,
}

const SEED_RULES: &[SeedRule] = &[
    SeedRule {
        id: "cancellation_prohibited",
        pattern: r"(não poderá cancelar|proibido cancelar|vedado rescindir).*(qualquer hipótese|mesmo em caso)",
        message: "Proibição Total de Cancelamento",
        explanation: "Cláusula que impede o cancelamento em qualquer circunstância é considerada abusiva pelo CDC (Art. 51, IV).",
        score: 15,
        category: Category::Abusive,
        recommendation: "Solicite a modificação para permitir cancelamento com aviso prévio de 30 dias.",
    },
    SeedRule {
        id: "silent_auto_renewal",
        pattern: r"(renovação automática|prorrogado automaticamente).*(sem aviso|não notifica)",
        message: "Renovação Automática sem Aviso",
        explanation: "Contratos devem prever aviso prévio de pelo menos 30 dias para renovação automática (Art. 9º, Lei 8.245/91).",
        score: 10,
        category: Category::Abusive,
        recommendation: "Exija cláusula que obrigue notificação com antecedência mínima de 30 dias.",
    },
    SeedRule {
        id: "excessive_penalty",
        pattern: r"(multa|juros).*(superior a 2%|acima de 10%|20%)",
        message: "Multa/Juros Abusivos",
        explanation: "Multas superiores a 2% ao mês ou juros acima da taxa média do mercado são considerados abusivos (Súmula 54 do STJ).",
        score: 12,
        category: Category::Abusive,
        recommendation: "Negocie redução para no máximo 2% de multa e juros de 1% ao mês.",
    },
    SeedRule {
        id: "liability_waiver",
        pattern: r"(não se responsabiliza|isenção de responsabilidade).*(qualquer falha|indisponibilidade)",
        message: "Isenção Total de Responsabilidade",
        explanation: "Empresas não podem se eximir totalmente de responsabilidade por falhas na prestação de serviços (Art. 14, CDC).",
        score: 15,
        category: Category::Abusive,
        recommendation: "Exija redação que limite responsabilidade apenas a casos de força maior.",
    },
    SeedRule {
        id: "foreign_jurisdiction",
        pattern: r"(foro|jurisdição).*(Luxemburgo|exterior|estrangeiro)",
        message: "Foro em País Estrangeiro",
        explanation: "Contratos com consumidores brasileiros devem prever foro no Brasil (Art. 78, CDC).",
        score: 15,
        category: Category::Abusive,
        recommendation: "Insista em foro no local de sua residência no Brasil.",
    },
    SeedRule {
        id: "withdrawal_right",
        pattern: r"(direito ao arrependimento|desistência|7 dias)",
        message: "Direito ao Arrependimento",
        explanation: "Cláusula que respeita o direito legal de arrependimento em 7 dias (Art. 49, CDC).",
        score: -5,
        category: Category::Favorable,
        recommendation: "Mantenha esta cláusula que protege seus direitos.",
    },
];

lazy_static! {
    /// Compiled built-in catalog. Patterns are fixed at build time and
    /// covered by tests, so compilation cannot fail at runtime.
    static ref SEED_CATALOG: RuleCatalog =
        RuleCatalog::new(seed_definitions()).expect("built-in rule catalog must compile");
}

/// The built-in rule definitions, in catalog order.
pub fn seed_definitions() -> Vec<RuleDefinition> {
    SEED_RULES
        .iter()
        .map(|r| RuleDefinition {
            id: r.id.to_string(),
            pattern: r.pattern.to_string(),
            message: r.message.to_string(),
            explanation: r.explanation.to_string(),
            score: r.score,
            category: r.category,
            recommendation: r.recommendation.to_string(),
        })
        .collect()
}

impl RuleCatalog {
    /// The shared built-in catalog.
    pub fn seed() -> &'static RuleCatalog {
        &SEED_CATALOG
    }
}
