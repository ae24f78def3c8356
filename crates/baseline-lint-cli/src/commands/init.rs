//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# baseline-lint configuration

# Rule preset: "recommended" or "all"
preset = "recommended"

# Lowest severity that makes `baseline-lint check` exit non-zero
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

# File extensions to analyze
# extensions = ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"]

# Respect .gitignore files
respect_gitignore = true

[oracle]
# web-features dataset (JSON), relative to this file
# dataset = "node_modules/web-features/data.json"

# Manual verdicts, applied before the dataset:
# true = not Baseline, false = treat as supported
[oracle.overrides]
# "navigator.share" = false

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.no-nonbaseline-api]
enabled = true
# severity = "error"
# global_aliases = ["window", "globalThis", "self"]

[rules.no-nonbaseline-css]
enabled = true
# extra_tags = ["global"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(PROJECT_CONFIG_NAMES[0]);
    write_config(config_path, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", config_path.display());
    println!("  2. Run: baseline-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseline_lint_core::{Config, Severity};

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_on, Some(Severity::Error));
        assert!(config.is_rule_enabled("no-nonbaseline-css"));
        assert!(config.oracle.overrides.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("baseline-lint.toml");
        std::fs::write(&path, "preset = \"all\"").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[oracle]"));
    }
}
