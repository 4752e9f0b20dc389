//! Clause matcher: scans contract text against a rule catalog.
//!
//! For every rule, in catalog order, every non-overlapping match becomes a
//! [`Finding`] carrying the rule and a context snippet. Matches from
//! different rules are never merged, so one clause may yield several
//! findings.

use crate::catalog::RuleCatalog;
use crate::types::Finding;

/// Characters of context kept on each side of a match.
pub const CONTEXT_RADIUS: usize = 50;

/// Snippets longer than this (in characters) are wrapped in ellipses.
pub const CONTEXT_WRAP_THRESHOLD: usize = 100;

/// Scans text against a borrowed catalog.
pub struct ClauseMatcher<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> ClauseMatcher<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Find every rule occurrence in `text`.
    ///
    /// Findings are ordered by rule, then left to right within a rule.
    pub fn scan(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        if text.is_empty() {
            return findings;
        }

        for rule in self.catalog.rules() {
            let before = findings.len();

            for m in rule.regex().find_iter(text) {
                findings.push(Finding {
                    rule: rule.definition().clone(),
                    context: context_snippet(text, m.start(), m.end()),
                });
            }

            let matched = findings.len() - before;
            if matched > 0 {
                tracing::debug!(rule = rule.id(), matches = matched, "Rule matched");
            }
        }

        findings
    }
}

/// Build the review snippet around the byte range `start..end` of `text`.
///
/// The window extends [`CONTEXT_RADIUS`] characters on each side, clipped
/// to the text. Newlines become spaces. A window longer than
/// [`CONTEXT_WRAP_THRESHOLD`] characters is wrapped as `...snippet...`.
///
/// `start` and `end` must lie on character boundaries, as regex match
/// offsets always do.
pub fn context_snippet(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_RADIUS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_RADIUS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    let snippet = text[from..to].replace('\n', " ");

    if snippet.chars().count() > CONTEXT_WRAP_THRESHOLD {
        format!("...{}...", snippet)
    } else {
        snippet
    }
}
