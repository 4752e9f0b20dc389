//! Clara CLI
//!
//! Command-line interface for contract risk screening.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a contract
//! clara analyze contrato.txt
//!
//! # Pipe from stdin
//! cat contrato.txt | clara analyze
//!
//! # Full report, or JSON
//! clara analyze contrato.txt --format report
//! clara analyze contrato.txt --format json
//!
//! # Many contracts at once
//! clara batch contratos/*.txt
//!
//! # Inspect or check a rule catalog
//! clara rules list
//! clara rules validate rules.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - 0: LOW risk
//! - 1: MODERATE risk
//! - 2: HIGH risk
//! - 3: Error

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clara_core::{AnalysisResult, Locale, ReportComposer, RiskTier, RuleCatalog};
use clara_runtime::{Analyzer, RuntimeConfig};

/// Clara: heuristic risk screening for consumer contracts
#[derive(Parser)]
#[command(name = "clara")]
#[command(version)]
#[command(about = "Flag abusive clauses in contract text and score the overall risk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one contract
    Analyze {
        /// Path to the contract text (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show context and recommendation for every finding
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        runtime: RuntimeArgs,
    },

    /// Analyze several contracts in parallel, one line per file
    Batch {
        /// Contract text files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        runtime: RuntimeArgs,
    },

    /// Rule catalog commands
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List the rules of a catalog (built-in if no path is given)
    List {
        /// Path to a catalog file (YAML or JSON)
        path: Option<PathBuf>,
    },

    /// Validate a catalog file
    Validate {
        /// Path to the catalog file
        path: PathBuf,
    },
}

/// Options shared by the analysis commands. Flags override the config file.
#[derive(Args)]
struct RuntimeArgs {
    /// Runtime configuration file (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule catalog replacing the built-in rules (YAML or JSON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Report language: pt-br or en
    #[arg(long)]
    locale: Option<Locale>,

    /// Explicit timestamp for deterministic analysis (ISO 8601 / RFC 3339).
    /// Example: --analyzed-at 2025-12-20T00:00:00Z
    #[arg(long, value_parser = parse_datetime)]
    analyzed_at: Option<DateTime<Utc>>,

    /// Largest accepted input in bytes (0 disables the limit)
    #[arg(long)]
    max_input_bytes: Option<usize>,
}

impl RuntimeArgs {
    fn into_config(self) -> Result<RuntimeConfig> {
        let mut config = match &self.config {
            Some(path) => RuntimeConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => RuntimeConfig::default(),
        };

        if let Some(catalog) = self.catalog {
            config.catalog = Some(catalog);
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(analyzed_at) = self.analyzed_at {
            config.determinism.analyzed_at = Some(analyzed_at);
        }
        if let Some(max_input_bytes) = self.max_input_bytes {
            config.max_input_bytes = max_input_bytes;
        }
        Ok(config)
    }

    fn into_analyzer(self) -> Result<Analyzer> {
        let config = self.into_config()?;
        Analyzer::new(config).context("Failed to prepare analyzer")
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Report,
}

/// Parse ISO 8601 / RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime format: {}. Expected ISO 8601/RFC 3339 (e.g., 2025-12-20T00:00:00Z)", e))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            format,
            explain,
            runtime,
        } => analyze_command(file, format, explain, runtime),

        Commands::Batch { files, runtime } => batch_command(files, runtime),

        Commands::Rules { action } => match action {
            RulesAction::List { path } => list_rules(path),
            RulesAction::Validate { path } => validate_rules(path),
        },
    }
}

fn exit_code_for(tier: RiskTier) -> ExitCode {
    match tier {
        RiskTier::Low => ExitCode::from(0),
        RiskTier::Moderate => ExitCode::from(1),
        RiskTier::High => ExitCode::from(2),
    }
}

fn analyze_command(
    file: Option<PathBuf>,
    format: OutputFormat,
    explain: bool,
    runtime: RuntimeArgs,
) -> Result<ExitCode> {
    let analyzer = runtime.into_analyzer()?;

    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read contract from {:?}", path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let result = analyzer.analyze(&text).context("Analysis failed")?;
    let composer = analyzer.composer();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Report => {
            print!("{}", composer.render(&result));
        }
        OutputFormat::Text => {
            print_text_result(&composer, &result, explain);
        }
    }

    Ok(exit_code_for(result.risk_tier))
}

fn print_text_result(composer: &ReportComposer, result: &AnalysisResult, explain: bool) {
    let locale = composer.locale();

    println!("{}", locale.tier_label(result.risk_tier));
    println!();
    println!("Score: {}", result.total_score);

    let counts = result.category_counts();
    println!(
        "Findings: {} abusive, {} potential, {} favorable",
        counts.abusive, counts.potential, counts.favorable
    );
    println!();

    if result.problematic().next().is_some() {
        println!("Problematic:");
        for finding in result.problematic() {
            println!("  {}", composer.render_finding(finding));
        }
        println!();
    }

    if result.favorable().next().is_some() {
        println!("Favorable:");
        for finding in result.favorable() {
            println!("  {}", composer.render_finding(finding));
        }
        println!();
    }

    println!("{}", locale.recommendation_for(result));

    if explain && result.has_findings() {
        println!();
        println!("--- Clause Details ---");

        for finding in &result.findings {
            println!();
            println!("[{}] {} ({})", finding.category().as_str(), finding.rule.message, finding.rule.id);
            println!("  Context: {}", finding.context);
            if !finding.rule.recommendation.is_empty() {
                println!("  Recommendation: {}", finding.rule.recommendation);
            }
        }
    }
}

fn batch_command(files: Vec<PathBuf>, runtime: RuntimeArgs) -> Result<ExitCode> {
    let analyzer = runtime.into_analyzer()?;

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let results = rt.block_on(analyzer.analyze_files(&files));

    let mut worst = RiskTier::Low;
    let mut failed = false;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(result) => {
                println!(
                    "{}: {} ({} pts, {} findings)",
                    path.display(),
                    result.risk_tier,
                    result.total_score,
                    result.findings.len()
                );
                worst = worst.max(result.risk_tier);
            }
            Err(e) => {
                eprintln!("{}: ERROR - {}", path.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        return Ok(ExitCode::from(3));
    }
    Ok(exit_code_for(worst))
}

fn list_rules(path: Option<PathBuf>) -> Result<ExitCode> {
    let catalog = match &path {
        Some(path) => RuleCatalog::from_file(path)
            .with_context(|| format!("Failed to load catalog from {:?}", path))?,
        None => RuleCatalog::seed().clone(),
    };

    for rule in catalog.definitions() {
        println!(
            "{}: {} ({} pts, {})",
            rule.id,
            rule.message,
            rule.score,
            rule.category.as_str()
        );
    }

    Ok(ExitCode::from(0))
}

fn validate_rules(path: PathBuf) -> Result<ExitCode> {
    match RuleCatalog::from_file(&path) {
        Ok(catalog) => {
            println!("Catalog is valid: {} rules", catalog.len());
            for rule in catalog.definitions() {
                println!("  - {}", rule.id);
            }
            Ok(ExitCode::from(0))
        }
        Err(e) => {
            eprintln!("Catalog validation failed: {}", e);
            Ok(ExitCode::from(1))
        }
    }
}
