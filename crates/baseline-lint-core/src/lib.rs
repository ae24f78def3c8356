//! # baseline-lint-core
//!
//! Core framework for Baseline web-feature linting based on `swc` AST analysis.
//!
//! This crate provides the foundational traits and types for building
//! Baseline linters. It includes:
//!
//! - [`Rule`] trait for per-file AST-based rules
//! - [`FeatureOracle`] for deciding whether a web feature is Baseline
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use baseline_lint_core::{Analyzer, Rule, Severity};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod oracle;
pub mod source;
/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, DEFAULT_EXCLUDES};
pub use config::{
    AnalyzerConfig, Config, ConfigError, OracleConfig, RuleConfig, DEFAULT_EXTENSIONS,
};
pub use context::FileContext;
pub use oracle::{FeatureId, FeatureOracle, OracleError};
pub use rule::{Rule, RuleBox};
pub use types::{
    LintResult, Location, MessageTemplate, Severity, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
