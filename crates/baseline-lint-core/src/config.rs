//! Configuration types for baseline-lint.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Top-level configuration for baseline-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("recommended" or "all").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold that makes `check` exit non-zero (default: error).
    #[serde(default)]
    pub fail_on: Option<crate::Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Feature oracle configuration.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block of a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to analyze, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
            extensions: default_extensions(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Script and markup extensions analyzed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
}

/// Feature oracle configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Path to a `web-features` JSON dataset, relative to the project root.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Extra verdicts keyed by feature identifier (`true` = non-Baseline).
    #[serde(default)]
    pub overrides: BTreeMap<String, bool>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert!(config.oracle.dataset.is_none());
        assert!(config.analyzer.extensions.iter().any(|e| e == "tsx"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "all"
fail_on = "warn"

[analyzer]
root = "./web"
exclude = ["**/generated/**"]
extensions = ["js", "jsx"]

[oracle]
dataset = "node_modules/web-features/data.json"

[oracle.overrides]
"navigator.share" = false
"document.startViewTransition" = true

[rules.no-nonbaseline-css]
enabled = true
severity = "error"
extra_tags = ["global", "tw"]

[rules.no-nonbaseline-api]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("all"));
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert_eq!(config.analyzer.root, PathBuf::from("./web"));
        assert_eq!(config.analyzer.extensions, vec!["js", "jsx"]);
        assert_eq!(
            config.oracle.dataset,
            Some(PathBuf::from("node_modules/web-features/data.json"))
        );
        assert_eq!(config.oracle.overrides.get("navigator.share"), Some(&false));

        assert!(config.is_rule_enabled("no-nonbaseline-css"));
        assert!(!config.is_rule_enabled("no-nonbaseline-api"));
        assert!(config.is_rule_enabled("unknown-rule"));
        assert_eq!(
            config.rule_severity("no-nonbaseline-css"),
            Some(Severity::Error)
        );

        let css = config.rule("no-nonbaseline-css").unwrap();
        assert_eq!(css.get_str_array("extra_tags"), vec!["global", "tw"]);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("preset = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/baseline-lint.toml"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to read config file /nonexistent/baseline-lint.toml"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
