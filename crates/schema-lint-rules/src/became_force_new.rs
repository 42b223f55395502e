//! Rule flagging any `ForceNew` declaration touched by a patch.
//!
//! # Rationale
//!
//! Making an existing field force-replace destroys resources on the next
//! apply. The rule fires on every changed `ForceNew:` line of a field seen
//! on both sides, including a restatement of an existing value, so that each
//! one gets a review. A hunk's last field only counts on a side where it has
//! an edited attribute.
//! Intentional changes carry an allow directive:
//!
//! ```text
//! // schema-lint: allow(became-force-new) reason="the API cannot update it"
//! ```

use schema_lint_core::{Field, HunkContext, Rule, Severity, Suggestion, Violation, ViolationKind};
use tracing::debug;

/// Rule code for became-force-new.
pub const CODE: &str = "SL003";

/// Rule name for became-force-new.
pub const NAME: &str = "became-force-new";

/// Flags an existing field whose new side declares `ForceNew`.
#[derive(Debug, Clone)]
pub struct BecameForceNew {
    /// Severity level.
    pub severity: Severity,
}

impl Default for BecameForceNew {
    fn default() -> Self {
        Self::new()
    }
}

impl BecameForceNew {
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

impl Rule for BecameForceNew {
    fn kind(&self) -> ViolationKind {
        ViolationKind::BecameForceNew
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &HunkContext, before: &Field, after: Option<&Field>) -> Option<Violation> {
        let after = after?;
        let value = after.force_new?;

        debug!("{NAME}: `{}` declares ForceNew: {value}", before.name);
        Some(
            ctx.violation(self.kind(), before, Some(after))
                .with_suggestion(Suggestion::new(
                    "Support in-place updates, or add an allow directive with a reason",
                )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn test_detects_new_force_new() {
        let violations = check(
            &BecameForceNew::new(),
            " \t\t\t\"vpc_name\": {
 \t\t\t\tType:     schema.TypeString,
 \t\t\t\tOptional: true,
+\t\t\t\tForceNew: true,
 \t\t\t},
 \t\t\t\"description\": {
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code(), CODE);
        assert_eq!(violations[0].field, "vpc_name");
    }

    #[test]
    fn test_trailing_field_without_edited_before_lines_is_not_judged() {
        let violations = check(
            &BecameForceNew::new(),
            " \t\t\t\"vpc_name\": {
 \t\t\t\tOptional: true,
+\t\t\t\tForceNew: true,
 \t\t\t},
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_fires_on_false_value() {
        let violations = check(
            &BecameForceNew::new(),
            " \t\t\t\"vpc_name\": {
-\t\t\t\tForceNew: true,
+\t\t\t\tForceNew: false,
",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_removed_force_new_is_fine() {
        let violations = check(
            &BecameForceNew::new(),
            " \t\t\t\"vpc_name\": {
 \t\t\t\tType:     schema.TypeString,
-\t\t\t\tForceNew: true,
 \t\t\t},
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allow_without_reason_warns() {
        let violations = check(
            &BecameForceNew::new(),
            " \t\t\t\"vpc_name\": {
+\t\t\t\t// schema-lint: allow(became-force-new)
+\t\t\t\tForceNew: true,
 \t\t\t},
 \t\t\t\"description\": {
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].message.contains("missing required reason"));
    }
}
