//! Core types for violations and check results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the check.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// Returned when a severity string is not one of `error`, `warning`, `info`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`, expected: error, warning, info")]
pub struct UnknownSeverity(pub String);

/// Every kind of finding the checker can report.
///
/// The first four come from the patch compatibility check, the rest from the
/// documentation consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// An optional argument became required.
    OptionalToRequired,
    /// The declared type of a field changed.
    TypeChanged,
    /// `ForceNew` was introduced or touched on an existing field.
    BecameForceNew,
    /// The enumerated validation values lost entries.
    EnumShrunk,
    /// A schema field is not described by the document.
    MissingDocField,
    /// The document describes a field the schema does not have.
    ExtraDocField,
    /// The document says Optional, the schema does not.
    WrongOptionalFlag,
    /// The document says Required, the schema does not.
    WrongRequiredFlag,
    /// The document says `ForceNew`, the schema does not.
    WrongForceNewFlag,
}

impl ViolationKind {
    /// All kinds, in code order.
    pub const ALL: [Self; 9] = [
        Self::OptionalToRequired,
        Self::TypeChanged,
        Self::BecameForceNew,
        Self::EnumShrunk,
        Self::MissingDocField,
        Self::ExtraDocField,
        Self::WrongOptionalFlag,
        Self::WrongRequiredFlag,
        Self::WrongForceNewFlag,
    ];

    /// Stable rule code (e.g. "SL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::OptionalToRequired => "SL001",
            Self::TypeChanged => "SL002",
            Self::BecameForceNew => "SL003",
            Self::EnumShrunk => "SL004",
            Self::MissingDocField => "SL101",
            Self::ExtraDocField => "SL102",
            Self::WrongOptionalFlag => "SL103",
            Self::WrongRequiredFlag => "SL104",
            Self::WrongForceNewFlag => "SL105",
        }
    }

    /// Kebab-case rule name used in configuration and allow directives.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OptionalToRequired => "optional-to-required",
            Self::TypeChanged => "type-changed",
            Self::BecameForceNew => "became-force-new",
            Self::EnumShrunk => "enum-shrunk",
            Self::MissingDocField => "missing-doc-field",
            Self::ExtraDocField => "extra-doc-field",
            Self::WrongOptionalFlag => "wrong-optional-flag",
            Self::WrongRequiredFlag => "wrong-required-flag",
            Self::WrongForceNewFlag => "wrong-force-new-flag",
        }
    }

    /// Short description of the broken expectation.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::OptionalToRequired => "attribute must not change from optional to required",
            Self::TypeChanged => "attribute type must not change",
            Self::BecameForceNew => "attribute must not change to ForceNew",
            Self::EnumShrunk => "attribute enum values must not be fewer than before",
            Self::MissingDocField => "attribute is missing from the document",
            Self::ExtraDocField => "documented attribute does not exist in the schema",
            Self::WrongOptionalFlag => {
                "document marks attribute as Optional but the schema does not"
            }
            Self::WrongRequiredFlag => {
                "document marks attribute as Required but the schema does not"
            }
            Self::WrongForceNewFlag => {
                "document marks attribute as ForceNew but the schema does not"
            }
        }
    }

    /// Looks a kind up by its name or code.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name || k.code() == name)
    }

    /// Returns true for kinds produced by the patch compatibility check.
    #[must_use]
    pub fn is_compatibility(self) -> bool {
        matches!(
            self,
            Self::OptionalToRequired | Self::TypeChanged | Self::BecameForceNew | Self::EnumShrunk
        )
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as named by the patch or the documentation path.
    pub file: PathBuf,
    /// Line number (1-indexed, 0 when unknown).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A compatibility or consistency violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// What was violated.
    pub kind: ViolationKind,
    /// Field the violation is about.
    pub field: String,
    /// File or resource name the field belongs to.
    pub context: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Where the field was found.
    pub location: Location,
    /// Human-readable diagnostic.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new error-severity violation with the standard diagnostic text.
    #[must_use]
    pub fn new(
        kind: ViolationKind,
        field: impl Into<String>,
        context: impl Into<String>,
        location: Location,
    ) -> Self {
        let field = field.into();
        let context = context.into();
        let message = format!(
            "[Incompatible Change]: {} for {field} in {context}",
            kind.description()
        );
        Self {
            kind,
            field,
            context,
            severity: Severity::Error,
            location,
            message,
            suggestion: None,
        }
    }

    /// Rule code of this violation's kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Rule name of this violation's kind.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        self.kind.name()
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the diagnostic text.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location,
            self.severity,
            self.code(),
            self.message
        )
    }
}

/// A violation rendered through miette.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    code: &'static str,
    message: String,
    help: Option<String>,
    severity: Severity,
}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            code: v.code(),
            message: format!("{} ({})", v.message, v.location),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            severity: v.severity,
        }
    }
}

/// Result of running one or more checks.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files (patched sources or documents) checked.
    pub files_checked: usize,
    /// Number of diff hunks checked.
    #[serde(default)]
    pub hunks_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns violations of one kind.
    #[must_use]
    pub fn by_kind(&self, kind: ViolationKind) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.kind == kind).collect()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(e, w, i), v| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Adds violations and counters from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
        self.hunks_checked += other.hunks_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            ViolationKind::OptionalToRequired,
            "region",
            "alicloud/resource_alicloud_vpc.go",
            Location::new("alicloud/resource_alicloud_vpc.go", 42),
        )
        .with_severity(severity)
    }

    #[test]
    fn violation_message_uses_standard_template() {
        let v = make_violation(Severity::Error);
        insta::assert_snapshot!(v.message.as_str(), @"[Incompatible Change]: attribute must not change from optional to required for region in alicloud/resource_alicloud_vpc.go");
    }

    #[test]
    fn violation_display_is_compact() {
        let v = make_violation(Severity::Error);
        let display = format!("{v}");
        assert!(display.starts_with("alicloud/resource_alicloud_vpc.go:42: error [SL001]"));
    }

    #[test]
    fn kind_lookup_by_name_and_code() {
        assert_eq!(
            ViolationKind::from_name("became-force-new"),
            Some(ViolationKind::BecameForceNew)
        );
        assert_eq!(
            ViolationKind::from_name("SL104"),
            Some(ViolationKind::WrongRequiredFlag)
        );
        assert_eq!(ViolationKind::from_name("nope"), None);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = ViolationKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ViolationKind::ALL.len());
    }

    #[test]
    fn severity_parses_from_config_strings() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn has_violations_at_respects_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(!result.has_errors());
    }

    #[test]
    fn diagnostic_carries_code_and_help() {
        let v = make_violation(Severity::Warning).with_suggestion(Suggestion::new("revert"));
        let diag = ViolationDiagnostic::from(&v);
        assert_eq!(diag.code().map(|c| c.to_string()).as_deref(), Some("SL001"));
        assert_eq!(diag.help().map(|h| h.to_string()).as_deref(), Some("revert"));
        assert_eq!(diag.severity(), Some(miette::Severity::Warning));
    }
}
