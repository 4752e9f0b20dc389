//! Contract summarizer.
//!
//! Pulls identifying fields out of raw contract text: contract type,
//! both parties, total value and duration. Every extraction takes the first
//! match only and yields `None` when its anchor is missing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ContractSummary, ContractType};

/// Type markers, checked in order against the upper-cased text.
const CONTRACT_TYPE_MARKERS: &[(&str, ContractType)] = &[
    ("EDUCACIONAIS", ContractType::Educational),
    ("LOCAÇÃO", ContractType::Lease),
    ("PRESTAÇÃO DE SERVIÇOS", ContractType::ServicesProvision),
];

lazy_static! {
    /// Party section: "CONTRATANTE: ... CONTRATADA: ... CLÁUSULAS:"
    static ref PARTIES_PATTERN: Regex = Regex::new(
        r"(?is)CONTRATANTE:(.*?)CONTRATADA:(.*?)CLÁUSULAS:"
    ).unwrap();

    /// Value anchor followed by a Real-denominated amount
    static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?i)(valor total|valor do curso).*?R\$\s*([\d.,]+)"
    ).unwrap();

    /// Term anchor followed by a count and a unit
    static ref DURATION_PATTERN: Regex = Regex::new(
        r"(?i)(duração|prazo).*?(\d+)\s*(meses|anos|dias)"
    ).unwrap();
}

/// Extract the summary fields from `text`.
pub fn summarize(text: &str) -> ContractSummary {
    let (counterparty_a, counterparty_b) = extract_parties(text);

    let summary = ContractSummary {
        contract_type: classify_contract_type(text),
        counterparty_a,
        counterparty_b,
        amount: extract_amount(text),
        duration: extract_duration(text),
    };

    tracing::debug!(
        contract_type = ?summary.contract_type,
        parties_found = summary.counterparty_a.is_some(),
        amount_found = summary.amount.is_some(),
        duration_found = summary.duration.is_some(),
        "Contract summarized"
    );

    summary
}

/// Classify by marker vocabulary. The first marker present wins.
pub fn classify_contract_type(text: &str) -> ContractType {
    let upper = text.to_uppercase();

    CONTRACT_TYPE_MARKERS
        .iter()
        .find(|(marker, _)| upper.contains(marker))
        .map(|(_, contract_type)| *contract_type)
        .unwrap_or_default()
}

/// Extract both parties from the party section, if present.
///
/// A party whose text is blank after trimming is treated as absent.
pub fn extract_parties(text: &str) -> (Option<String>, Option<String>) {
    match PARTIES_PATTERN.captures(text) {
        Some(caps) => (non_blank(&caps[1]), non_blank(&caps[2])),
        None => (None, None),
    }
}

/// Extract the amount as `R$ <token>`, the token exactly as captured.
///
/// Separators are never normalized, so a sentence-ending `.` or `,` that
/// follows the digits stays part of the token.
pub fn extract_amount(text: &str) -> Option<String> {
    AMOUNT_PATTERN
        .captures(text)
        .map(|caps| format!("R$ {}", &caps[2]))
}

/// Extract the duration as `<count> <unit>`.
pub fn extract_duration(text: &str) -> Option<String> {
    DURATION_PATTERN
        .captures(text)
        .map(|caps| format!("{} {}", &caps[2], &caps[3]))
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
