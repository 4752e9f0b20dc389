//! Configuration for clara-runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use clara_core::{CatalogError, Locale, RuleCatalog};

/// Errors from loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to load rule catalog {path:?}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Largest accepted input, in bytes. Zero disables the cap.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Language of rendered reports
    #[serde(default)]
    pub locale: Locale,

    /// Rule catalog file (YAML or JSON). The built-in catalog is used when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Determinism configuration
    #[serde(default)]
    pub determinism: DeterminismConfig,
}

fn default_max_input_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            locale: Locale::default(),
            catalog: None,
            determinism: DeterminismConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a configuration file, choosing JSON for `.json` and YAML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Whether `len` bytes of input are within the configured cap.
    pub fn accepts_input_len(&self, len: usize) -> bool {
        self.max_input_bytes == 0 || len <= self.max_input_bytes
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<RuleCatalog, ConfigError> {
        match &self.catalog {
            Some(path) => RuleCatalog::from_file(path).map_err(|source| ConfigError::Catalog {
                path: path.clone(),
                source,
            }),
            None => Ok(RuleCatalog::seed().clone()),
        }
    }

    /// Timestamp to stamp on the next analysis.
    pub fn analysis_time(&self) -> DateTime<Utc> {
        self.determinism.analyzed_at.unwrap_or_else(Utc::now)
    }
}

/// Determinism configuration for reproducible analyses.
///
/// For golden tests and audits, set `analyzed_at` to a fixed timestamp:
///
/// ```yaml
/// determinism:
///   analyzed_at: "2025-12-20T10:00:00Z"
/// ```
///
/// When `analyzed_at` is None (default), the current system time is used.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeterminismConfig {
    /// Fixed timestamp for every analysis (ISO 8601)
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,
}
