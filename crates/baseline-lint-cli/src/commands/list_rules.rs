//! List rules command implementation.

use baseline_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        let codes: Vec<&str> = preset.rules().iter().map(|r| r.code()).collect();
        println!("  {:<12} - {}", preset.name(), codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  baseline-lint check --rules no-nonbaseline-api");
    println!("  baseline-lint check --rules BL001,BL002");
}
