//! Runtime analyzer.
//!
//! Owns one compiled catalog behind an `Arc` and runs analyses against it:
//! - Input-size cap enforced before any matching
//! - Configured locale and timestamp applied to every result
//! - Batch fan-out over tokio blocking tasks, results in input order

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use clara_core::{AnalysisResult, ReportComposer, RuleCatalog};

use crate::config::{ConfigError, RuntimeConfig};

/// Errors from the runtime analyzer.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Input too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Failed to read {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis task failed: {0}")]
    TaskFailed(String),
}

/// Runs analyses against a shared, immutable catalog.
///
/// Cloning an `Analyzer` is cheap; clones share the catalog.
#[derive(Debug, Clone)]
pub struct Analyzer {
    catalog: Arc<RuleCatalog>,
    config: RuntimeConfig,
}

impl Analyzer {
    /// Create an analyzer, loading the catalog named in `config`.
    ///
    /// A malformed catalog fails here, before any document is analyzed.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let catalog = config.load_catalog()?;
        tracing::debug!(rules = catalog.len(), "Analyzer ready");
        Ok(Self::with_catalog(catalog, config))
    }

    /// Create an analyzer around an already-built catalog.
    pub fn with_catalog(catalog: RuleCatalog, config: RuntimeConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Composer for the configured locale.
    pub fn composer(&self) -> ReportComposer {
        ReportComposer::new(self.config.locale)
    }

    /// Analyze one document.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, RuntimeError> {
        self.check_input(text)?;
        Ok(clara_core::analyze_with_catalog_at(
            &self.catalog,
            text,
            self.config.analysis_time(),
        ))
    }

    /// Analyze one document and render its report.
    pub fn report(&self, text: &str) -> Result<String, RuntimeError> {
        let result = self.analyze(text)?;
        Ok(self.composer().render(&result))
    }

    /// Analyze many documents in parallel.
    ///
    /// Each document runs on its own blocking task; the catalog is shared,
    /// never copied. Results come back in input order, and one failing
    /// document does not affect the others.
    pub async fn analyze_batch(
        &self,
        documents: Vec<String>,
    ) -> Vec<Result<AnalysisResult, RuntimeError>> {
        let analyzed_at = self.config.analysis_time();

        let handles: Vec<_> = documents
            .into_iter()
            .map(|text| {
                let checked = self.check_input(&text);
                let catalog = Arc::clone(&self.catalog);
                checked.map(|()| {
                    tokio::task::spawn_blocking(move || {
                        clara_core::analyze_with_catalog_at(&catalog, &text, analyzed_at)
                    })
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = match handle {
                Ok(task) => task.await.map_err(|e| {
                    tracing::warn!(error = %e, "Analysis task failed");
                    RuntimeError::TaskFailed(e.to_string())
                }),
                Err(e) => Err(e),
            };
            results.push(result);
        }
        results
    }

    /// Read and analyze many files in parallel.
    ///
    /// Reading happens on the blocking task of each file, so a missing or
    /// non-UTF-8 file fails only its own entry. Results come back in input
    /// order.
    pub async fn analyze_files(
        &self,
        paths: &[PathBuf],
    ) -> Vec<Result<AnalysisResult, RuntimeError>> {
        // One timestamp for the whole batch
        let mut analyzer = self.clone();
        analyzer.config.determinism.analyzed_at = Some(self.config.analysis_time());

        let handles: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| {
                let analyzer = analyzer.clone();
                tokio::task::spawn_blocking(move || {
                    let text = std::fs::read_to_string(&path)
                        .map_err(|source| RuntimeError::ReadFailed { path, source })?;
                    analyzer.analyze(&text)
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle.await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Analysis task failed");
                Err(RuntimeError::TaskFailed(e.to_string()))
            });
            results.push(result);
        }
        results
    }

    fn check_input(&self, text: &str) -> Result<(), RuntimeError> {
        if self.config.accepts_input_len(text.len()) {
            Ok(())
        } else {
            tracing::warn!(
                size = text.len(),
                limit = self.config.max_input_bytes,
                "Rejecting oversized input"
            );
            Err(RuntimeError::InputTooLarge {
                size: text.len(),
                limit: self.config.max_input_bytes,
            })
        }
    }
}
