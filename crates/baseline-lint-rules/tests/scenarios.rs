//! End-to-end runs of the built-in rules over fixture projects.

use baseline_lint_core::{Analyzer, Config, LintResult, Severity};
use baseline_lint_rules::{configured_rules, Preset};
use std::path::{Path, PathBuf};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn analyze(root: &Path, config: Config) -> LintResult {
    let mut builder = Analyzer::builder().root(root);
    for rule in configured_rules(&config) {
        builder = builder.rule_box(rule);
    }
    builder
        .config(config)
        .build()
        .expect("Failed to build analyzer")
        .analyze()
        .expect("Analysis failed")
}

fn render(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| {
            let value = v.data.values().next().cloned().unwrap_or_default();
            format!(
                "{}:{}:{} {} {} {}",
                v.location.file.display(),
                v.location.line,
                v.location.column,
                v.code,
                v.message_id,
                value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn site_fixture() {
    let result = analyze(&fixtures().join("site"), Config::default());

    assert_eq!(result.files_checked, 3);
    insta::assert_snapshot!(render(&result), @r"
    src/Sidebar.jsx:3:24 BL002 nonBaselineCssProperty container-type
    src/Sidebar.jsx:3:24 BL002 nonBaselineCssProperty container-name
    src/Sidebar.jsx:5:41 BL002 nonBaselineCssProperty aspect-ratio
    src/Sidebar.jsx:7:21 BL002 nonBaselineCssSelector :has
    src/share.js:2:3 BL001 nonBaselineApi navigator.share
    src/share.js:6:14 BL001 nonBaselineApi Intl.DurationFormat
    ");
}

#[test]
fn reruns_are_identical() {
    let root = fixtures().join("site");
    let first = analyze(&root, Config::default());
    let second = analyze(&root, Config::default());
    assert_eq!(first.violations, second.violations);
}

#[test]
fn presets_match_configured_rules() {
    let root = fixtures().join("site");
    for preset in Preset::ALL {
        let mut builder = Analyzer::builder().root(&root);
        for rule in preset.rules() {
            builder = builder.rule_box(rule);
        }
        let result = builder.build().unwrap().analyze().unwrap();
        assert_eq!(result.violations.len(), 6, "preset {}", preset.name());
    }
}

#[test]
fn config_overrides_pin_features() {
    let mut config = Config::default();
    config.oracle.overrides.insert("navigator.share".to_string(), false);
    config
        .oracle
        .overrides
        .insert("css.properties.aspect-ratio".to_string(), false);

    let result = analyze(&fixtures().join("site"), config);
    let rendered = render(&result);
    assert!(!rendered.contains("navigator.share"));
    assert!(!rendered.contains("aspect-ratio"));
    assert!(rendered.contains("Intl.DurationFormat"));
}

#[test]
fn disabled_rule_is_skipped() {
    let config = Config::parse("[rules.no-nonbaseline-css]\nenabled = false\n").unwrap();
    let result = analyze(&fixtures().join("site"), config);
    assert!(result.violations.iter().all(|v| v.code == "BL001"));
    assert_eq!(result.violations.len(), 2);
}

#[test]
fn dataset_classifications() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("app.js"),
        "document.startViewTransition(() => {});\nnavigator.gpu;\nnavigator.usb;\nArray.isArray([]);\n",
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("view.jsx"),
        "export const V = () => <textarea style={{ fieldSizing: 'content' }} />;\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.oracle.dataset = Some(fixtures().join("web-features.json"));

    let result = analyze(tmp.path(), config);
    insta::assert_snapshot!(render(&result), @r"
    app.js:1:1 BL001 nonBaselineApi document.startViewTransition
    view.jsx:1:43 BL002 nonBaselineCssProperty field-sizing
    ");
}

#[test]
fn severity_override_from_config() {
    let config = Config::parse("[rules.no-nonbaseline-api]\nseverity = \"error\"\n").unwrap();
    let result = analyze(&fixtures().join("site"), config);
    let severities: Vec<Severity> = result.violations.iter().map(|v| v.severity).collect();
    assert!(severities.contains(&Severity::Error));
    assert!(severities.contains(&Severity::Warning));
}
