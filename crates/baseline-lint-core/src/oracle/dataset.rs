//! External feature dataset in the `web-features` layout.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Baseline status of a feature as published by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineStatus {
    /// Widely available across major engines (`"high"`).
    WidelyAvailable,
    /// Newly available across major engines (`"low"`).
    NewlyAvailable,
    /// Not available in every major engine (`false`).
    Limited,
}

impl<'de> Deserialize<'de> for BaselineStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Level(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(Self::Limited),
            Raw::Flag(true) => Ok(Self::WidelyAvailable),
            Raw::Level(level) => match level.as_str() {
                "high" => Ok(Self::WidelyAvailable),
                "low" => Ok(Self::NewlyAvailable),
                other => Err(serde::de::Error::unknown_variant(other, &["high", "low"])),
            },
        }
    }
}

/// Status block of a feature record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureStatus {
    /// Baseline classification.
    pub baseline: BaselineStatus,
}

/// A single entry of the feature dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureRecord {
    /// Category tag; only `"feature"` records are actionable.
    pub kind: String,
    /// Status block, absent on non-feature entries such as moved or split ids.
    #[serde(default)]
    pub status: Option<FeatureStatus>,
}

impl FeatureRecord {
    /// Returns true if this record is a concrete feature outside Baseline.
    #[must_use]
    pub fn is_non_baseline(&self) -> bool {
        self.kind == "feature"
            && self
                .status
                .as_ref()
                .is_some_and(|s| s.baseline == BaselineStatus::Limited)
    }
}

/// Entry stored after loading; malformed records are kept as tombstones.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Record(FeatureRecord),
    Malformed,
}

/// Errors raised while loading a dataset file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read feature dataset {path}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The dataset is not a JSON object of feature records.
    #[error("Invalid feature dataset: {message}")]
    Invalid {
        /// Description of the problem.
        message: String,
    },
}

/// Read-only mapping from feature identifier to record.
#[derive(Debug, Clone, Default)]
pub struct FeatureDataset {
    entries: HashMap<String, Entry>,
}

impl FeatureDataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dataset = Self::from_json_str(&content)?;
        info!(
            "Loaded {} feature records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parses a dataset from JSON text.
    ///
    /// Accepts the published layout (`{"features": {...}}`) and a flat
    /// `{id: record}` object. Individual records that do not match the
    /// expected shape are kept as malformed and answer "not found".
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or not an object.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let root: Value = serde_json::from_str(json).map_err(|e| DatasetError::Invalid {
            message: e.to_string(),
        })?;

        let Value::Object(mut root) = root else {
            return Err(DatasetError::Invalid {
                message: "top-level value must be an object".to_string(),
            });
        };

        let features = match root.remove("features") {
            Some(Value::Object(features)) => features,
            Some(_) => {
                return Err(DatasetError::Invalid {
                    message: "\"features\" must be an object".to_string(),
                })
            }
            None => root,
        };

        let entries = features
            .into_iter()
            .map(|(id, value)| {
                let entry = match serde_json::from_value::<FeatureRecord>(value) {
                    Ok(record) => Entry::Record(record),
                    Err(e) => {
                        debug!("Malformed feature record '{}': {}", id, e);
                        Entry::Malformed
                    }
                };
                (id, entry)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Returns the record for `id` if present and well-formed.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FeatureRecord> {
        match self.entries.get(id)? {
            Entry::Record(record) => Some(record),
            Entry::Malformed => None,
        }
    }

    /// Returns the number of entries, malformed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dataset has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "features": {
            "document.startViewTransition": { "kind": "feature", "status": { "baseline": false } },
            "Array.fromAsync": { "kind": "feature", "status": { "baseline": "low" } },
            "fetch": { "kind": "feature", "status": { "baseline": "high" } },
            "numeric-seperators": { "kind": "moved", "redirect_target": "numeric-separators" },
            "broken": { "kind": 42 },
            "odd-status": { "kind": "feature", "status": { "baseline": "medium" } }
        },
        "groups": {}
    }"#;

    #[test]
    fn parses_wrapped_layout() {
        let dataset = FeatureDataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 6);
        assert!(dataset
            .get("document.startViewTransition")
            .unwrap()
            .is_non_baseline());
        assert!(!dataset.get("Array.fromAsync").unwrap().is_non_baseline());
        assert!(!dataset.get("fetch").unwrap().is_non_baseline());
    }

    #[test]
    fn non_feature_kinds_are_not_actionable() {
        let dataset = FeatureDataset::from_json_str(SAMPLE).unwrap();
        let moved = dataset.get("numeric-seperators").unwrap();
        assert_eq!(moved.kind, "moved");
        assert!(!moved.is_non_baseline());
    }

    #[test]
    fn malformed_records_read_as_absent() {
        let dataset = FeatureDataset::from_json_str(SAMPLE).unwrap();
        assert!(dataset.get("broken").is_none());
        assert!(dataset.get("odd-status").is_none());
    }

    #[test]
    fn parses_flat_layout() {
        let dataset = FeatureDataset::from_json_str(
            r#"{ "css.properties.field-sizing": { "kind": "feature", "status": { "baseline": false } } }"#,
        )
        .unwrap();
        assert!(dataset
            .get("css.properties.field-sizing")
            .unwrap()
            .is_non_baseline());
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(
            FeatureDataset::from_json_str("[1, 2]"),
            Err(DatasetError::Invalid { .. })
        ));
        assert!(matches!(
            FeatureDataset::from_json_str("{ \"features\": [] }"),
            Err(DatasetError::Invalid { .. })
        ));
        assert!(FeatureDataset::from_json_str("not json").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FeatureDataset::from_path(Path::new("/nonexistent/web-features.json"))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to read feature dataset /nonexistent/web-features.json"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
