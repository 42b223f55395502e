//! Core analyzer for orchestrating compatibility and consistency checks.

use crate::config::{Config, ConfigError};
use crate::consistency::SchemaDocConsistencyChecker;
use crate::context::HunkContext;
use crate::diff::{Hunk, Patch, PatchError, PatchFile};
use crate::engine::CompatibilityRuleEngine;
use crate::extractor::FieldAttributeExtractor;
use crate::field::FieldSet;
use crate::markdown::{DocumentationExtractor, ResourceNameError};
use crate::rule::{Rule, RuleBox};
use crate::schema::{SchemaError, SchemaSource};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a check. Violations are never errors.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A patch or document could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The patch is malformed.
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// A resource name could not be resolved.
    #[error(transparent)]
    ResourceName(#[from] ResourceNameError),

    /// The schema registry could not be loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The schema registry has no entry for the resource.
    #[error("resource `{0}` is not in the schema registry")]
    UnknownResource(String),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn read(path: &Path) -> Result<String, AnalyzerError> {
    std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    docs_dir: Option<PathBuf>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a compatibility rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed compatibility rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an include glob pattern, replacing the configured ones.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Adds an exclude glob pattern on top of the configured ones.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Overrides the documentation directory.
    #[must_use]
    pub fn docs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.docs_dir = Some(dir.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern or the `fail_on` setting is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let mut config = self.config.unwrap_or_default();
        config.fail_on()?;

        if let Some(dir) = self.docs_dir {
            config.docs.dir = dir;
        }

        let include = if self.include_patterns.is_empty() {
            config.patch.include.clone()
        } else {
            self.include_patterns
        };
        let mut exclude = config.patch.exclude.clone();
        exclude.extend(self.exclude_patterns);

        let compile = |patterns: Vec<String>| -> Result<Vec<glob::Pattern>, AnalyzerError> {
            patterns
                .iter()
                .map(|p| glob::Pattern::new(p).map_err(AnalyzerError::from))
                .collect()
        };

        let mut engine = CompatibilityRuleEngine::new();
        for rule in self.rules {
            if config.is_rule_enabled(rule.name()) {
                engine.push(rule);
            } else {
                debug!("Skipping disabled rule: {}", rule.name());
            }
        }

        Ok(Analyzer {
            engine,
            extractor: FieldAttributeExtractor::new(),
            documents: DocumentationExtractor::new(config.provider.clone()),
            include: compile(include)?,
            exclude: compile(exclude)?,
            config,
        })
    }
}

/// The main analyzer that orchestrates checks.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    engine: CompatibilityRuleEngine,
    extractor: FieldAttributeExtractor,
    documents: DocumentationExtractor,
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of enabled compatibility rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.engine.rules().len()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a patched file is subject to the compatibility check.
    #[must_use]
    pub fn should_check(&self, path: &str) -> bool {
        self.include.iter().any(|p| p.matches(path))
            && !self.exclude.iter().any(|p| p.matches(path))
    }

    /// Checks one hunk of `file`.
    #[must_use]
    pub fn check_hunk(&self, file: &str, index: usize, hunk: &Hunk) -> Vec<Violation> {
        let (before, after) = self.extractor.extract_hunk(hunk);
        debug!(
            "{file} hunk {index}: {} field(s) before, {} after",
            before.len(),
            after.len()
        );
        let ctx = HunkContext::new(file);
        self.apply_config(self.engine.evaluate(&ctx, &before, &after))
    }

    /// Checks every hunk of every selected file in a parsed patch.
    #[must_use]
    pub fn check_patch(&self, patch: &Patch) -> LintResult {
        let mut result = LintResult::new();

        for file in &patch.files {
            if !self.selects(file) {
                continue;
            }
            for (index, hunk) in file.hunks.iter().enumerate() {
                result.violations.extend(self.check_hunk(&file.new_name, index, hunk));
                result.hunks_checked += 1;
            }
            result.files_checked += 1;
        }

        info!(
            "Compatibility check complete: {} violation(s) in {} hunk(s) of {} file(s)",
            result.violations.len(),
            result.hunks_checked,
            result.files_checked
        );
        result
    }

    /// Parses and checks patch text.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch is malformed.
    pub fn check_patch_text(&self, text: &str) -> Result<LintResult, AnalyzerError> {
        let patch = Patch::parse(text)?;
        Ok(self.check_patch(&patch))
    }

    /// Reads, parses and checks a patch file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn check_patch_file(&self, path: &Path) -> Result<LintResult, AnalyzerError> {
        info!("Checking patch {}", path.display());
        self.check_patch_text(&read(path)?)
    }

    fn selects(&self, file: &PatchFile) -> bool {
        if file.is_deleted() {
            debug!("Skipping deleted file {}", file.old_name);
            return false;
        }
        if !self.should_check(&file.new_name) {
            debug!("Skipping {}", file.new_name);
            return false;
        }
        true
    }

    /// Checks already-loaded documentation text against a schema.
    #[must_use]
    pub fn check_document_text(
        &self,
        resource: &str,
        doc_path: &Path,
        text: &str,
        schema: &FieldSet,
    ) -> LintResult {
        let doc = self.documents.extract(resource, text).merged_fields();
        let report = SchemaDocConsistencyChecker::new(resource, doc_path).check(&doc, schema);
        if report.inconsistent {
            warn!("{resource}: documentation and schema disagree");
        }

        let mut result = LintResult::new();
        result.violations = self.apply_config(report.violations);
        result.files_checked = 1;
        result
    }

    /// Checks the documentation of one resource against its schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource name is unresolvable, the document
    /// cannot be read, or the schema has no such resource.
    pub fn check_resource(
        &self,
        resource: &str,
        schema: &dyn SchemaSource,
    ) -> Result<LintResult, AnalyzerError> {
        let docs = &self.config.docs;
        let doc_path = self
            .documents
            .doc_path(resource, &docs.dir, &docs.extension)?;
        let fields = schema
            .resource_schema(resource)
            .ok_or_else(|| AnalyzerError::UnknownResource(resource.to_string()))?;

        let text = read(&doc_path)?;
        let resolved = self.documents.resource_name_from_path(&doc_path)?;
        if resolved != resource {
            debug!("{} resolves to {resolved}", doc_path.display());
        }
        info!("Checking {resource} against {}", doc_path.display());
        Ok(self.check_document_text(resource, &doc_path, &text, &fields))
    }

    /// Checks every resource the schema source knows.
    ///
    /// # Errors
    ///
    /// Stops at the first resource that cannot be checked.
    pub fn check_all_resources(
        &self,
        schema: &dyn SchemaSource,
    ) -> Result<LintResult, AnalyzerError> {
        let mut result = LintResult::new();
        for resource in schema.resource_names() {
            result.extend(self.check_resource(&resource, schema)?);
        }
        info!(
            "Consistency check complete: {} violation(s) in {} document(s)",
            result.violations.len(),
            result.files_checked
        );
        Ok(result)
    }

    /// Drops violations of disabled rules and applies severity overrides.
    fn apply_config(&self, violations: Vec<Violation>) -> Vec<Violation> {
        violations
            .into_iter()
            .filter(|v| self.config.is_rule_enabled(v.rule()))
            .map(|v| match self.config.rule_severity(v.rule()) {
                Some(severity) => v.with_severity(severity),
                None => v,
            })
            .collect()
    }
}
