//! Rule forbidding an optional argument from becoming required.
//!
//! # Rationale
//!
//! Configurations written against the previous release may omit the
//! argument. Once it is required they no longer plan.
//!
//! # Detected Patterns
//!
//! ```text
//!  "region": {
//! -    Optional: true,
//! +    Required: true,
//! ```

use schema_lint_core::{Field, HunkContext, Rule, Severity, Suggestion, Violation, ViolationKind};
use tracing::debug;

/// Rule code for optional-to-required.
pub const CODE: &str = "SL001";

/// Rule name for optional-to-required.
pub const NAME: &str = "optional-to-required";

/// Flags a field that was `Optional: true` and is now `Required: true`.
#[derive(Debug, Clone)]
pub struct OptionalToRequired {
    /// Severity level.
    pub severity: Severity,
}

impl Default for OptionalToRequired {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionalToRequired {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for OptionalToRequired {
    fn kind(&self) -> ViolationKind {
        ViolationKind::OptionalToRequired
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &HunkContext, before: &Field, after: Option<&Field>) -> Option<Violation> {
        let after = after?;
        if !(before.is_optional() && after.is_required()) {
            return None;
        }

        debug!("{NAME}: `{}` in {}", before.name, ctx.file);
        Some(
            ctx.violation(self.kind(), before, Some(after))
                .with_suggestion(Suggestion::new(
                    "Keep the argument optional and supply a default or compute it instead",
                )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn test_detects_optional_to_required() {
        let violations = check(
            &OptionalToRequired::new(),
            " \t\t\t\"region\": {
 \t\t\t\tType:     schema.TypeString,
-\t\t\t\tOptional: true,
+\t\t\t\tRequired: true,
 \t\t\t},
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code(), CODE);
        assert_eq!(violations[0].field, "region");
        assert_eq!(violations[0].location.line, 20);
        insta::assert_snapshot!(violations[0].message.as_str(), @"[Incompatible Change]: attribute must not change from optional to required for region in alicloud/resource_alicloud_vpc.go");
    }

    #[test]
    fn test_required_to_optional_is_fine() {
        let violations = check(
            &OptionalToRequired::new(),
            " \t\t\t\"region\": {
-\t\t\t\tRequired: true,
+\t\t\t\tOptional: true,
 \t\t\t},
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_false_flags_do_not_count() {
        let violations = check(
            &OptionalToRequired::new(),
            " \t\t\t\"region\": {
-\t\t\t\tOptional: false,
+\t\t\t\tRequired: true,
 \t\t\t},
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_new_field_is_not_judged() {
        let violations = check(
            &OptionalToRequired::new(),
            "+\t\t\t\"zone\": {
+\t\t\t\tRequired: true,
+\t\t\t},
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allow_directive_with_reason() {
        let violations = check(
            &OptionalToRequired::new(),
            " \t\t\t\"region\": {
-\t\t\t\tOptional: true,
+\t\t\t\t// schema-lint: allow(optional-to-required) reason=\"resource not yet released\"
+\t\t\t\tRequired: true,
 \t\t\t},
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_custom_severity() {
        let rule = OptionalToRequired::new().severity(Severity::Warning);
        let violations = check(
            &rule,
            " \t\t\t\"region\": {
-\t\t\t\tOptional: true,
+\t\t\t\tRequired: true,
",
        );
        assert_eq!(violations[0].severity, Severity::Warning);
    }
}
