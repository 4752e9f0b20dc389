//! # clara-runtime
//!
//! Configuration and orchestration around `clara-core`.
//!
//! The core analysis is pure and total. This crate adds what a service or
//! CLI needs around it: loading a [`RuntimeConfig`] from YAML or JSON,
//! choosing the rule catalog, capping input size, and fanning a batch of
//! documents out over tokio blocking tasks against one shared catalog.
//!
//! ```rust,ignore
//! use clara_runtime::{Analyzer, RuntimeConfig};
//!
//! let analyzer = Analyzer::new(RuntimeConfig::from_file("clara.yaml")?)?;
//! let result = analyzer.analyze(&text)?;
//! ```

pub mod config;
pub mod orchestrator;

pub use config::{ConfigError, DeterminismConfig, RuntimeConfig};
pub use orchestrator::{Analyzer, RuntimeError};
