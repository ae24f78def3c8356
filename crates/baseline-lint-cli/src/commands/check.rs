//! Check command implementation.

use anyhow::{bail, Context, Result};
use baseline_lint_core::{Analyzer, Config, RuleBox, Severity};
use baseline_lint_rules::{configured_rules, Preset};
use std::path::{Path, PathBuf};

use crate::config_resolver;
use crate::OutputFormat;

/// Arguments of `baseline-lint check`.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Path to analyze (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only run specific rules (comma-separated names or codes)
    #[arg(long)]
    pub rules: Option<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// web-features JSON dataset, overriding `[oracle] dataset`
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Lowest severity that makes the command fail, overriding `fail_on`
    #[arg(long)]
    pub fail_on: Option<Severity>,
}

/// Runs the check command.
///
/// Returns `Ok(false)` when a violation reaches the failure threshold.
pub fn run(args: &CheckArgs, config_path: Option<&Path>) -> Result<bool> {
    let source = config_resolver::resolve(&args.path, config_path);
    let mut config = source.load()?;

    if let Some(dataset) = &args.dataset {
        let dataset = std::path::absolute(dataset)
            .with_context(|| format!("Failed to resolve dataset path: {}", dataset.display()))?;
        config.oracle.dataset = Some(dataset);
    }

    let fail_on = args.fail_on.or(config.fail_on).unwrap_or(Severity::Error);
    let rules = select_rules(&config, args.rules.as_deref())?;

    let mut builder = Analyzer::builder()
        .root(&args.path)
        .excludes(args.exclude.iter().cloned());
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        args.path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, args.format, analyzer.root())?;

    Ok(!result.has_violations_at(fail_on))
}

/// Picks the rules to run: an explicit `--rules` list, else the config preset.
fn select_rules(config: &Config, filter: Option<&str>) -> Result<Vec<RuleBox>> {
    let available = configured_rules(config);

    if let Some(filter) = filter {
        let wanted: Vec<&str> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        for name in &wanted {
            if !available.iter().any(|r| r.name() == *name || r.code() == *name) {
                tracing::warn!("Unknown rule: {}", name);
            }
        }
        return Ok(available
            .into_iter()
            .filter(|r| wanted.iter().any(|w| r.name() == *w || r.code() == *w))
            .collect());
    }

    let preset_name = config.preset.as_deref().unwrap_or("recommended");
    let Some(preset) = Preset::from_name(preset_name) else {
        bail!("Unknown preset '{preset_name}' (expected \"recommended\" or \"all\")");
    };
    let names: Vec<&str> = preset.rules().iter().map(|r| r.name()).collect();

    Ok(available
        .into_iter()
        .filter(|r| names.contains(&r.name()))
        .collect())
}
