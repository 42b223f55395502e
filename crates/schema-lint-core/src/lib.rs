//! # schema-lint-core
//!
//! Core framework for checking provider resource schemas without compiling
//! the provider.
//!
//! This crate provides the two checks and the pieces they are built from:
//!
//! - [`Patch`] parsing and the [`FieldAttributeExtractor`] that turns each
//!   hunk side into a [`FieldSet`]
//! - [`Rule`] trait and [`CompatibilityRuleEngine`] for backward-compatibility
//!   rules over before/after field sets
//! - [`DocumentationExtractor`] and [`SchemaDocConsistencyChecker`] for
//!   comparing documentation pages against a [`SchemaSource`]
//! - [`Analyzer`] for orchestrating both checks under a [`Config`]
//! - [`DiagnosticSink`] for delivering [`Violation`]s
//!
//! ## Example
//!
//! ```ignore
//! use schema_lint_core::{Analyzer, TracingSink};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(OptionalToRequired::new())
//!     .build()?;
//!
//! let result = analyzer.check_patch_file("change.patch".as_ref())?;
//! result.emit(&mut TracingSink);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allowance;
mod analyzer;
mod config;
mod consistency;
mod context;
mod diff;
mod engine;
mod extractor;
mod field;
mod markdown;
mod patterns;
mod rule;
mod schema;
mod sink;
mod types;

pub use allowance::{parse_allow_directive, AllowCheck, AllowDirective};
pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigError, DocsConfig, PatchConfig, RuleConfig};
pub use consistency::{ConsistencyReport, SchemaDocConsistencyChecker};
pub use context::HunkContext;
pub use diff::{DiffLine, Hunk, HunkRange, LineMode, Patch, PatchError, PatchFile, Side};
pub use engine::CompatibilityRuleEngine;
pub use extractor::{classify, AttributeKind, FieldAttributeExtractor, LineMatch};
pub use field::{Field, FieldSet, Resource, ID_FIELD};
pub use markdown::{DocumentationExtractor, ResourceNameError};
pub use rule::{Rule, RuleBox};
pub use schema::{JsonSchemaRegistry, SchemaAttribute, SchemaError, SchemaSource};
pub use sink::{CollectingSink, DiagnosticSink, TracingSink};
pub use types::{
    LintResult, Location, Severity, Suggestion, UnknownSeverity, Violation, ViolationDiagnostic,
    ViolationKind,
};
