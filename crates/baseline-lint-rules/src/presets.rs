//! Rule presets for common configurations.

use crate::{NoNonBaselineApi, NoNonBaselineCss};
use baseline_lint_core::{Config, RuleBox};

/// Preset configurations for baseline-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Every available rule.
    All,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 2] = [Self::Recommended, Self::All];

    /// Looks a preset up by its config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the config name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::All => "all",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::All => all_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `no-nonbaseline-api` (BL001) - Flags non-Baseline web APIs
/// - `no-nonbaseline-css` (BL002) - Flags non-Baseline CSS
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoNonBaselineApi::new()),
        Box::new(NoNonBaselineCss::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoNonBaselineApi::new()),
        Box::new(NoNonBaselineCss::new()),
    ]
}

/// Returns every rule built with its options from `config`.
///
/// Rules without a `[rules.<name>]` section use their defaults. Enabling and
/// severity overrides are applied later by the analyzer.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    let api = config
        .rule(crate::no_nonbaseline_api::NAME)
        .map_or_else(NoNonBaselineApi::new, NoNonBaselineApi::from_config);
    let css = config
        .rule(crate::no_nonbaseline_css::NAME)
        .map_or_else(NoNonBaselineCss::new, NoNonBaselineCss::from_config);

    vec![Box::new(api), Box::new(css)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(
            names(&Preset::Recommended.rules()),
            vec!["no-nonbaseline-api", "no-nonbaseline-css"]
        );
        assert_eq!(names(&Preset::All.rules()), names(&Preset::Recommended.rules()));
    }

    #[test]
    fn test_preset_names() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("strict"), None);
    }

    #[test]
    fn test_default_severity_is_warning() {
        for rule in all_rules() {
            assert_eq!(rule.default_severity(), baseline_lint_core::Severity::Warning);
        }
    }

    #[test]
    fn test_configured_rules_keep_order() {
        let config =
            Config::parse("[rules.no-nonbaseline-css]\nextra_tags = [\"global\"]\n").unwrap();
        assert_eq!(
            names(&configured_rules(&config)),
            vec!["no-nonbaseline-api", "no-nonbaseline-css"]
        );
    }
}
