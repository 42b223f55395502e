//! Init command implementation.

use anyhow::{bail, Context, Result};
use schema_lint_core::{Config, RuleConfig};
use schema_lint_rules::{all_rules, Preset};
use std::path::Path;

const HEADER: &str = "# schema-lint configuration
#
# provider: resource names are `<provider>_<type>`
# preset:   compat rule preset (recommended, lenient)
# fail_on:  lowest severity that fails a check (error, warning, info)
# [patch]:  globs selecting the patched files the compat check reads
# [docs]:   where `<type><extension>` documents live
# [rules.<name>]: enabled = false disables a rule, severity overrides it

";

/// Builds the configuration written by `init`.
fn default_config() -> Config {
    let mut config = Config::new();
    config.preset = Some(Preset::Recommended.name().to_string());
    config.fail_on = Some("error".to_string());
    for rule in all_rules() {
        config.rules.insert(
            rule.name().to_string(),
            RuleConfig {
                enabled: Some(true),
                severity: None,
            },
        );
    }
    config
}

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("schema-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let body = toml::to_string_pretty(&default_config()).context("Failed to render config")?;
    std::fs::write(config_path, format!("{HEADER}{body}"))?;

    println!("Created schema-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit schema-lint.toml to configure rules");
    println!("  2. Run: schema-lint compat <PATCH>");

    Ok(())
}
