//! Shared output formatting for lint results.

use anyhow::Result;
use baseline_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::GraphicalReportHandler;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is used to read sources back for the pretty format.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Pretty => print_pretty(result, root),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!(
            "  {}: {}",
            severity_indicator(violation.severity),
            violation.message
        );
        println!();
    }

    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_pretty(result: &LintResult, root: &Path) {
    let handler = GraphicalReportHandler::new();

    for violation in &result.violations {
        match render_pretty(&handler, violation, root) {
            Some(rendered) => println!("{} {rendered}", severity_indicator(violation.severity)),
            // Source vanished since analysis; fall back to one line
            None => println!("{violation}"),
        }
    }

    print_summary(result);
}

fn render_pretty(
    handler: &GraphicalReportHandler,
    violation: &Violation,
    root: &Path,
) -> Option<String> {
    let source = std::fs::read_to_string(root.join(&violation.location.file)).ok()?;
    let diagnostic = ViolationDiagnostic::new(violation, source);

    let mut rendered = String::new();
    handler.render_report(&mut rendered, &diagnostic).ok()?;
    Some(rendered)
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
