//! Consistency command implementation.

use anyhow::{Context, Result};
use schema_lint_core::{Analyzer, JsonSchemaRegistry};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the consistency command.
///
/// `resource` of `None` checks every resource in the registry.
pub fn run(
    schema: &Path,
    resource: Option<&str>,
    docs_dir: Option<&Path>,
    format: OutputFormat,
    source: &ConfigSource,
) -> Result<()> {
    let config = super::load_config(source)?;
    let registry = JsonSchemaRegistry::from_file(schema)
        .with_context(|| format!("Failed to load schema: {}", schema.display()))?;

    let mut builder = Analyzer::builder().config(config);
    if let Some(dir) = docs_dir {
        builder = builder.docs_dir(dir);
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;

    let result = match resource {
        Some(name) => analyzer
            .check_resource(name, &registry)
            .with_context(|| format!("Consistency check of {name} failed"))?,
        None => {
            tracing::info!("Checking {} resources", registry.len());
            analyzer
                .check_all_resources(&registry)
                .context("Consistency check failed")?
        }
    };

    super::report(&result, format, analyzer.config())
}
