//! Rule definitions and catalog construction from YAML/JSON.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::Category;

/// Errors that can occur when building a rule catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Rule {id} has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("Duplicate rule ID: {0}")]
    DuplicateRuleId(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Declarative description of one clause type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleDefinition {
    /// Unique identifier (e.g., "cancellation_prohibited")
    pub id: String,

    /// Regular expression, matched case-insensitively
    pub pattern: String,

    /// Short human label for the clause type
    pub message: String,

    /// Legal or practical rationale
    pub explanation: String,

    /// Risk weight; negative weights mark protective clauses
    pub score: i32,

    pub category: Category,

    /// Advice for the reader of the contract
    #[serde(default)]
    pub recommendation: String,
}

/// A rule with its compiled pattern.
#[derive(Debug, Clone)]
pub struct Rule {
    definition: RuleDefinition,
    regex: Regex,
}

impl Rule {
    /// Compile a definition. The pattern is always case-insensitive.
    pub fn compile(definition: RuleDefinition) -> Result<Self, CatalogError> {
        let regex = RegexBuilder::new(&definition.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| CatalogError::InvalidPattern {
                id: definition.id.clone(),
                source,
            })?;

        Ok(Self { definition, regex })
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    rules: Vec<RuleDefinition>,
}

/// Ordered, immutable collection of compiled rules.
///
/// Order only decides the order of findings; it carries no precedence.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// A catalog with no rules. Scanning with it finds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and compile a list of definitions.
    ///
    /// Fails on the first invalid pattern, duplicate ID or missing field,
    /// so a malformed catalog never reaches a scan.
    pub fn new(definitions: Vec<RuleDefinition>) -> Result<Self, CatalogError> {
        validate_definitions(&definitions)?;

        let rules = definitions
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rules = rules.len(), "Rule catalog compiled");
        Ok(Self { rules })
    }

    /// Parse a catalog from a YAML string (`rules:` list).
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.rules)
    }

    /// Parse a catalog from a JSON string (`{"rules": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.rules)
    }

    /// Parse a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a catalog file, choosing JSON for `.json` and YAML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Return a new catalog with `definition` appended.
    pub fn with_rule(self, definition: RuleDefinition) -> Result<Self, CatalogError> {
        let mut definitions: Vec<RuleDefinition> = self.definitions().cloned().collect();
        definitions.push(definition);
        Self::new(definitions)
    }

    /// Return a new catalog without the rule `id`. Unknown IDs are ignored.
    pub fn without_rule(mut self, id: &str) -> Self {
        self.rules.retain(|r| r.id() != id);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn definitions(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().map(Rule::definition)
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn validate_definitions(definitions: &[RuleDefinition]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();

    for (index, definition) in definitions.iter().enumerate() {
        if definition.id.trim().is_empty() {
            return Err(CatalogError::MissingField(format!("rules[{}].id", index)));
        }
        if definition.pattern.is_empty() {
            return Err(CatalogError::MissingField(format!(
                "rules[{}].pattern",
                index
            )));
        }
        if definition.message.trim().is_empty() {
            return Err(CatalogError::MissingField(format!(
                "rules[{}].message",
                index
            )));
        }
        if !seen.insert(definition.id.as_str()) {
            return Err(CatalogError::DuplicateRuleId(definition.id.clone()));
        }
    }

    Ok(())
}
