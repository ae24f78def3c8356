//! Locating and loading the configuration file.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/baseline-lint.toml` or `{project}/.baseline-lint.toml`
//! 3. `~/.baseline-lint/config.toml`, or `$BASELINE_LINT_CONFIG_DIR/config.toml`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use baseline_lint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the global config.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Reads the configuration this source points at.
    ///
    /// A relative `[oracle] dataset` path is taken relative to the config
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };

        if self.is_global() {
            tracing::info!("Using global config: {}", path.display());
        }

        let mut config = Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        if let (Some(dataset), Some(dir)) = (&config.oracle.dataset, path.parent()) {
            if dataset.is_relative() {
                // The analyzer rebases relative paths on its root, so this must be absolute
                let dir = std::path::absolute(dir).with_context(|| {
                    format!("Failed to resolve config directory: {}", dir.display())
                })?;
                config.oracle.dataset = Some(dir.join(dataset));
            }
        }

        Ok(config)
    }
}

/// Project config file names, in lookup order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["baseline-lint.toml", ".baseline-lint.toml"];

/// File name inside the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "BASELINE_LINT_CONFIG_DIR";

/// Finds the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the global config directory.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".baseline-lint"))
}
