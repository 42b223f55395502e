//! List rules command implementation.

use schema_lint_core::ViolationKind;
use schema_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Compatibility rules (compat):\n");
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

    println!("\nConsistency checks (consistency):\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for kind in ViolationKind::ALL.iter().filter(|k| !k.is_compatibility()) {
        println!(
            "{:<10} {:<25} {}",
            kind.code(),
            kind.name(),
            kind.description()
        );
    }

    println!("\nPresets (--preset):");
    for preset in Preset::ALL {
        println!("  {:<12} - {}", preset.name(), preset.description());
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  schema-lint compat --rules type-changed,enum-shrunk change.patch");
    println!("  schema-lint compat --rules SL001,SL002 change.patch");
}
