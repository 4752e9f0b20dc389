//! Rule catalog.
//!
//! A catalog is an ordered list of pattern rules, validated and compiled
//! once and read-only during analysis. The built-in catalog lives in
//! [`seed`]; custom catalogs are loaded from YAML or JSON.

mod rule;
mod seed;

pub use rule::{CatalogError, Rule, RuleCatalog, RuleDefinition};
pub use seed::seed_definitions;
