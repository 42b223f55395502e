//! Compat command implementation.

use anyhow::{bail, Context, Result};
use schema_lint_core::{Analyzer, Config, RuleBox, ViolationKind};
use schema_lint_rules::{all_rules, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the compat command.
pub fn run(
    patch: &Path,
    format: OutputFormat,
    preset: Option<&str>,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = super::load_config(source)?;

    let rules_to_add = if let Some(filter) = rules_filter {
        let rule_names: Vec<&str> = filter.split(',').map(str::trim).collect();
        filter_rules(&rule_names)
    } else {
        let preset = resolve_preset(preset, &config)?;
        tracing::debug!("Using preset {}", preset.name());
        preset.rules()
    };

    let mut builder = Analyzer::builder().config(config);

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }

    let analyzer = builder
        .rules(rules_to_add)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {} with {} rules",
        patch.display(),
        analyzer.rule_count()
    );

    let result = analyzer
        .check_patch_file(patch)
        .context("Compatibility check failed")?;

    super::report(&result, format, analyzer.config())
}

/// Resolves the effective preset from command line > config > default.
fn resolve_preset(arg: Option<&str>, config: &Config) -> Result<Preset> {
    let name = arg.or(config.preset.as_deref()).unwrap_or("recommended");

    match Preset::from_name(name) {
        Some(preset) => Ok(preset),
        None => {
            let valid: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
            bail!("Unknown preset `{name}`. Valid presets: {}", valid.join(", "))
        }
    }
}

fn filter_rules(names: &[&str]) -> Vec<RuleBox> {
    let mut kinds = Vec::new();
    for name in names {
        match ViolationKind::from_name(name) {
            Some(kind) if kind.is_compatibility() => kinds.push(kind),
            Some(kind) => tracing::warn!("{} is a consistency check, not a compat rule", kind),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    all_rules()
        .into_iter()
        .filter(|r| kinds.contains(&r.kind()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_by_name_and_code() {
        let rules = filter_rules(&["type-changed", "SL004", "no-such-rule"]);
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["type-changed", "enum-shrunk"]);
    }

    #[test]
    fn filter_skips_consistency_kinds() {
        let rules = filter_rules(&["missing-doc-field", "SL105"]);
        assert!(rules.is_empty());
    }

    #[test]
    fn resolve_preset_defaults_to_recommended() {
        let config = Config::default();
        assert_eq!(resolve_preset(None, &config).unwrap(), Preset::Recommended);
    }

    #[test]
    fn resolve_preset_from_config() {
        let mut config = Config::default();
        config.preset = Some("lenient".to_string());
        assert_eq!(resolve_preset(None, &config).unwrap(), Preset::Lenient);
    }

    #[test]
    fn resolve_preset_argument_takes_precedence() {
        let mut config = Config::default();
        config.preset = Some("lenient".to_string());
        assert_eq!(
            resolve_preset(Some("recommended"), &config).unwrap(),
            Preset::Recommended
        );
    }

    #[test]
    fn resolve_preset_rejects_unknown_name() {
        let err = resolve_preset(Some("strict"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("recommended, lenient"));
    }
}
