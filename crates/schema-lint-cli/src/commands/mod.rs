//! Subcommand implementations.

pub mod compat;
pub mod consistency;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use schema_lint_core::{Config, LintResult};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Loads the configuration a resolved source points at.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    let mut config = Config::from_file(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    if let Some(base) = source.base_dir() {
        anchor_docs_dir(&mut config, base);
    }
    Ok(config)
}

/// Makes a relative `[docs] dir` relative to `base` instead.
fn anchor_docs_dir(config: &mut Config, base: &Path) {
    if config.docs.dir.is_relative() {
        config.docs.dir = base.join(&config.docs.dir);
        tracing::debug!("Documents resolve to {}", config.docs.dir.display());
    }
}

/// Prints the result and exits with status 1 if it fails the configured
/// threshold.
pub fn report(result: &LintResult, format: OutputFormat, config: &Config) -> Result<()> {
    let fail_on = config.fail_on().context("Invalid fail_on")?;
    output::print(result, format, fail_on)?;
    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn relative_docs_dir_is_anchored() {
        let mut config = Config::default();
        anchor_docs_dir(&mut config, Path::new(".."));
        assert_eq!(config.docs.dir, PathBuf::from("../website/docs/r"));
    }

    #[test]
    fn absolute_docs_dir_is_kept() {
        let mut config = Config::default();
        config.docs.dir = PathBuf::from("/srv/provider/docs");
        anchor_docs_dir(&mut config, Path::new(".."));
        assert_eq!(config.docs.dir, PathBuf::from("/srv/provider/docs"));
    }

    #[test]
    fn loading_from_parent_anchors_docs() {
        let repo = tempfile::TempDir::new().unwrap();
        let path = repo.path().join("schema-lint.toml");
        std::fs::write(&path, "[docs]\ndir = \"docs/r\"\n").unwrap();
        let source = ConfigSource::Ancestor(path);
        let config = load_config(&source).unwrap();
        assert_eq!(config.docs.dir, repo.path().join("docs/r"));
    }
}
