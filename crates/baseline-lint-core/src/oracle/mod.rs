//! Baseline feature classification.
//!
//! The [`FeatureOracle`] answers one question: is a feature identifier
//! outside Baseline? It consults the [`OverrideTable`] first and the external
//! [`FeatureDataset`] second. Every miss answers `false`, so an unknown or
//! malformed feature never produces a diagnostic.

mod dataset;
mod overrides;

pub use dataset::{BaselineStatus, DatasetError, FeatureDataset, FeatureRecord, FeatureStatus};
pub use overrides::{OverrideTable, NON_BASELINE_APIS, NON_BASELINE_CSS_PROPERTIES};

use crate::config::OracleConfig;
use std::path::Path;
use tracing::trace;

/// Namespace prefix for CSS property identifiers.
pub const CSS_PROPERTY_PREFIX: &str = "css.properties.";

/// Namespace prefix for CSS selector identifiers.
pub const CSS_SELECTOR_PREFIX: &str = "css.selectors.";

/// Dotted key used to look up a feature's Baseline status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(String);

impl FeatureId {
    /// Creates an identifier from its dotted form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Joins access-chain segments (`["navigator", "share"]` → `navigator.share`).
    #[must_use]
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".");
        Self(joined)
    }

    /// Identifier of a CSS property (`css.properties.<name>`).
    #[must_use]
    pub fn css_property(name: &str) -> Self {
        Self(format!("{CSS_PROPERTY_PREFIX}{name}"))
    }

    /// Identifier of a CSS selector (`css.selectors.<name>`).
    #[must_use]
    pub fn css_selector(name: &str) -> Self {
        Self(format!("{CSS_SELECTOR_PREFIX}{name}"))
    }

    /// Returns the dotted string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while building an oracle from configuration.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The configured dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Read-only Baseline classifier shared by all rules.
#[derive(Debug, Clone, Default)]
pub struct FeatureOracle {
    overrides: OverrideTable,
    dataset: FeatureDataset,
}

impl FeatureOracle {
    /// Creates an oracle from an override table and a dataset.
    #[must_use]
    pub fn new(overrides: OverrideTable, dataset: FeatureDataset) -> Self {
        Self { overrides, dataset }
    }

    /// Builds the oracle described by the `[oracle]` configuration section.
    ///
    /// Relative dataset paths are resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured dataset cannot be loaded.
    pub fn from_config(config: &OracleConfig, base_dir: &Path) -> Result<Self, OracleError> {
        let dataset = match &config.dataset {
            Some(path) if path.is_absolute() => FeatureDataset::from_path(path)?,
            Some(path) => FeatureDataset::from_path(&base_dir.join(path))?,
            None => FeatureDataset::empty(),
        };

        let overrides = OverrideTable::builtin().with_entries(
            config
                .overrides
                .iter()
                .map(|(id, verdict)| (id.clone(), *verdict)),
        );

        Ok(Self::new(overrides, dataset))
    }

    /// Returns true if `id` names a feature outside Baseline.
    #[must_use]
    pub fn is_non_baseline(&self, id: &FeatureId) -> bool {
        if let Some(verdict) = self.overrides.verdict(id) {
            trace!("Override verdict for {}: {}", id, verdict);
            return verdict;
        }

        let Some(record) = self.dataset.get(id.as_str()) else {
            return false;
        };

        record.is_non_baseline()
    }

    /// Returns true if the CSS property `name` is outside Baseline.
    #[must_use]
    pub fn is_non_baseline_css_property(&self, name: &str) -> bool {
        self.is_non_baseline(&FeatureId::css_property(name))
    }

    /// Returns the override table.
    #[must_use]
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }
}
