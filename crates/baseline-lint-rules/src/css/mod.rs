//! Classification of CSS text found in script files.

mod walker;

pub use walker::{outline, CssOutline};

use baseline_lint_core::{FeatureId, FeatureOracle};
use std::collections::HashMap;

/// Properties also found by a raw substring scan, before any parsing.
///
/// The scan catches these even when the surrounding text does not parse.
pub const RAW_SCAN_PROPERTIES: &[&str] = &["container-type", "container-name"];

/// A pseudo-class whose presence in a selector is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorPattern {
    /// Substring searched for in the lowercased selector text.
    pub needle: &'static str,
    /// Canonical name used in messages.
    pub name: &'static str,
    /// Name under the `css.selectors.` namespace.
    pub feature: &'static str,
}

/// Non-Baseline pseudo-classes, in match priority order.
pub const NON_BASELINE_SELECTORS: &[SelectorPattern] = &[
    SelectorPattern {
        needle: ":has(",
        name: ":has",
        feature: "has",
    },
    SelectorPattern {
        needle: ":is(",
        name: ":is",
        feature: "is",
    },
    SelectorPattern {
        needle: ":where(",
        name: ":where",
        feature: "where",
    },
];

/// A non-Baseline feature found in CSS text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssFinding {
    /// A property declaration.
    Property(String),
    /// A selector using a listed pseudo-class; holds the canonical name.
    Selector(&'static str),
}

/// Returns the first listed pseudo-class used by `selector`.
#[must_use]
pub fn match_selector(selector: &str) -> Option<&'static SelectorPattern> {
    let lowered = selector.to_ascii_lowercase();
    NON_BASELINE_SELECTORS
        .iter()
        .find(|p| lowered.contains(p.needle))
}

/// Finds non-Baseline properties and selectors in `text`.
///
/// Findings come in this order: raw scan hits, then declarations, then
/// selectors, each group in document order. A declaration already counted by
/// the raw scan is reported once.
#[must_use]
pub fn check_css_text(text: &str, oracle: &FeatureOracle) -> Vec<CssFinding> {
    let mut findings = Vec::new();
    let mut already_reported: HashMap<&str, usize> = HashMap::new();

    for &property in RAW_SCAN_PROPERTIES {
        if !oracle.is_non_baseline_css_property(property) {
            continue;
        }
        let hits = text.matches(&format!("{property}:")).count();
        if hits > 0 {
            already_reported.insert(property, hits);
            findings.extend((0..hits).map(|_| CssFinding::Property(property.to_string())));
        }
    }

    let outline = outline(text);

    for property in outline.properties {
        if let Some(remaining) = already_reported.get_mut(property.as_str()) {
            if *remaining > 0 {
                *remaining -= 1;
                continue;
            }
        }
        if oracle.is_non_baseline_css_property(&property) {
            findings.push(CssFinding::Property(property));
        }
    }

    for prelude in &outline.preludes {
        let Some(pattern) = match_selector(prelude) else {
            continue;
        };
        // Pinning the selector to supported in the config silences it
        let pinned = oracle
            .overrides()
            .verdict(&FeatureId::css_selector(pattern.feature));
        if pinned != Some(false) {
            findings.push(CssFinding::Selector(pattern.name));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseline_lint_core::oracle::{FeatureDataset, OverrideTable};

    fn property(name: &str) -> CssFinding {
        CssFinding::Property(name.to_string())
    }

    #[test]
    fn raw_and_parsed_hits_are_reported_once() {
        let findings = check_css_text(
            "container-type: inline-size; container-name: sidebar;",
            &FeatureOracle::default(),
        );
        assert_eq!(
            findings,
            vec![property("container-type"), property("container-name")]
        );
    }

    #[test]
    fn raw_scan_survives_parse_failure() {
        let findings = check_css_text("{{{ container-type:", &FeatureOracle::default());
        assert_eq!(findings, vec![property("container-type")]);
    }

    #[test]
    fn every_occurrence_is_reported() {
        let findings = check_css_text(
            ".a { container-type: size } .b { container-type: normal }",
            &FeatureOracle::default(),
        );
        assert_eq!(
            findings,
            vec![property("container-type"), property("container-type")]
        );
    }

    #[test]
    fn declarations_are_lowercased() {
        let findings = check_css_text("Aspect-Ratio: 1 / 1;", &FeatureOracle::default());
        assert_eq!(findings, vec![property("aspect-ratio")]);
    }

    #[test]
    fn has_selector_in_nested_rule() {
        let findings = check_css_text("div:has(> span) { color: red; }", &FeatureOracle::default());
        assert_eq!(findings, vec![CssFinding::Selector(":has")]);
    }

    #[test]
    fn first_selector_pattern_wins() {
        let pattern = match_selector("main:where(.x) :is(a, b)").unwrap();
        assert_eq!(pattern.name, ":is");
        assert_eq!(match_selector("A:HAS(b)").unwrap().name, ":has");
        assert!(match_selector("a:hover").is_none());
    }

    #[test]
    fn order_is_raw_then_declarations_then_selectors() {
        let findings = check_css_text(
            ".grid:where(.x) { aspect-ratio: 1; container-type: size }",
            &FeatureOracle::default(),
        );
        assert_eq!(
            findings,
            vec![
                property("container-type"),
                property("aspect-ratio"),
                CssFinding::Selector(":where"),
            ]
        );
    }

    #[test]
    fn has_selector_in_at_rule_prelude() {
        let findings = check_css_text(
            "@supports selector(:has(a)) { .x { color: red } }",
            &FeatureOracle::default(),
        );
        assert_eq!(findings, vec![CssFinding::Selector(":has")]);
    }

    #[test]
    fn plain_css_is_clean() {
        let oracle = FeatureOracle::default();
        assert!(check_css_text("color: red; background-color: blue;", &oracle).is_empty());
        assert!(check_css_text("display: flex; margin: 10px;", &oracle).is_empty());
        assert!(check_css_text("", &oracle).is_empty());
    }

    #[test]
    fn overrides_pin_properties_and_selectors() {
        let oracle = FeatureOracle::new(
            OverrideTable::builtin()
                .with_entry("css.properties.container-type", false)
                .with_entry("css.selectors.has", false),
            FeatureDataset::empty(),
        );
        let findings = check_css_text(
            "div:has(p) { container-type: size; container-name: x }",
            &oracle,
        );
        assert_eq!(findings, vec![property("container-name")]);
    }

    #[test]
    fn dataset_classifies_other_properties() {
        let dataset = FeatureDataset::from_json_str(
            r#"{"css.properties.anchor-name": {"kind": "feature", "status": {"baseline": false}}}"#,
        )
        .unwrap();
        let oracle = FeatureOracle::new(OverrideTable::builtin(), dataset);
        let findings = check_css_text("anchor-name: --tip; color: red", &oracle);
        assert_eq!(findings, vec![property("anchor-name")]);
    }
}
