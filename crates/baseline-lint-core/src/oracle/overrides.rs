//! Manual verdicts consulted before the dataset.

use std::collections::BTreeMap;

use super::{CSS_PROPERTY_PREFIX, FeatureId};

/// APIs known to be outside Baseline but missing or stale in the dataset.
pub const NON_BASELINE_APIS: &[&str] = &[
    "navigator.share",
    "Intl.DurationFormat",
    "navigator.clipboard.writeText",
];

/// CSS properties known to be outside Baseline but missing or stale in the dataset.
pub const NON_BASELINE_CSS_PROPERTIES: &[&str] =
    &["container-type", "container-name", "aspect-ratio"];

/// Mapping from feature identifier to a forced verdict.
///
/// `true` forces "non-Baseline", `false` forces "supported".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, bool>,
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OverrideTable {
    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates the table with the built-in API and CSS property entries.
    #[must_use]
    pub fn builtin() -> Self {
        let apis = NON_BASELINE_APIS.iter().map(|id| ((*id).to_string(), true));
        let properties = NON_BASELINE_CSS_PROPERTIES
            .iter()
            .map(|name| (format!("{CSS_PROPERTY_PREFIX}{name}"), true));

        Self {
            entries: apis.chain(properties).collect(),
        }
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with_entry(mut self, id: impl Into<String>, non_baseline: bool) -> Self {
        self.entries.insert(id.into(), non_baseline);
        self
    }

    /// Adds or replaces several entries.
    #[must_use]
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(id, v)| (id.into(), v)));
        self
    }

    /// Returns the forced verdict for `id`, if any.
    #[must_use]
    pub fn verdict(&self, id: &FeatureId) -> Option<bool> {
        self.entries.get(id.as_str()).copied()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
