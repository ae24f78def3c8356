//! # baseline-lint-rules
//!
//! Built-in lint rules for baseline-lint.
//!
//! This crate provides the rules that flag web platform features which are
//! not yet Baseline, i.e. not available across all major browser engines.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | BL001 | `no-nonbaseline-api` | Flags web API accesses such as `navigator.share` |
//! | BL002 | `no-nonbaseline-css` | Flags CSS properties and selectors in CSS-in-JS, `cssText` and JSX `style` |
//!
//! ## Usage
//!
//! ```ignore
//! use baseline_lint_core::Analyzer;
//! use baseline_lint_rules::{NoNonBaselineApi, NoNonBaselineCss};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .rule(NoNonBaselineApi::new())
//!     .rule(NoNonBaselineCss::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod css;
mod no_nonbaseline_api;
mod no_nonbaseline_css;
mod presets;

pub use no_nonbaseline_api::NoNonBaselineApi;
pub use no_nonbaseline_css::NoNonBaselineCss;
pub use presets::{all_rules, configured_rules, recommended_rules, Preset};

/// Message templates and identifiers exposed by the built-in rules.
pub mod messages {
    pub use crate::no_nonbaseline_api::{CODE as API_CODE, MESSAGE as API, NAME as API_RULE};
    pub use crate::no_nonbaseline_css::{
        CODE as CSS_CODE, NAME as CSS_RULE, PROPERTY_MESSAGE as CSS_PROPERTY,
        SELECTOR_MESSAGE as CSS_SELECTOR,
    };
}

/// Re-export core types for convenience.
pub use baseline_lint_core::{Rule, Severity, Violation};
