//! Core types for lint violations and results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    #[serde(alias = "warn")]
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A diagnostic message with `{{placeholder}}` interpolation.
///
/// The `id` is the stable machine-readable message identifier reported
/// alongside the rendered text (e.g. `nonBaselineApi`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    /// Stable message identifier.
    pub id: &'static str,
    /// Template text with `{{name}}` placeholders.
    pub template: &'static str,
}

impl MessageTemplate {
    /// Creates a new message template.
    #[must_use]
    pub const fn new(id: &'static str, template: &'static str) -> Self {
        Self { id, template }
    }

    /// Renders the template, substituting every `{{key}}` with its value.
    ///
    /// Placeholders without a matching entry are left untouched.
    #[must_use]
    pub fn render(&self, data: &BTreeMap<String, String>) -> String {
        let mut message = self.template.to_string();
        for (key, value) in data {
            message = message.replace(&format!("{{{{{key}}}}}"), value);
        }
        message
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "BL001").
    pub code: String,
    /// Rule name (e.g., "no-nonbaseline-api").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Stable message identifier (e.g., "nonBaselineApi"). Empty for
    /// free-form messages.
    #[serde(rename = "messageId", default, skip_serializing_if = "String::is_empty")]
    pub message_id: String,
    /// Interpolation data used to render the message.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation with a free-form message and no message id.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message_id: String::new(),
            rule: rule.into(),
            severity,
            location,
            data: BTreeMap::new(),
            message: message.into(),
        }
    }

    /// Creates a violation by rendering a message template with `data`.
    #[must_use]
    pub fn from_template(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        template: &MessageTemplate,
        data: &[(&str, &str)],
    ) -> Self {
        let data: BTreeMap<String, String> = data
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message_id: template.id.to_string(),
            message: template.render(&data),
            data,
        }
    }

}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation paired with its source text for miette's graphical report.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
    #[help]
    help: Option<String>,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` over the given file contents.
    #[must_use]
    pub fn new(violation: &Violation, source: String) -> Self {
        let name = violation.location.file.display().to_string();
        Self {
            message: format!("[{}] {}", violation.code, violation.message),
            src: NamedSource::new(name, source),
            span: SourceSpan::from((violation.location.offset, violation.location.length)),
            label_message: violation.rule.clone(),
            help: (!violation.message_id.is_empty())
                .then(|| format!("message id: {}", violation.message_id)),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }
}
