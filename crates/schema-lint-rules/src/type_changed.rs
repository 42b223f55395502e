//! Rule forbidding changes to a field's declared type.
//!
//! # Rationale
//!
//! State stored by the previous release may not convert to the new type,
//! even when the two types look compatible.
//!
//! # Detected Patterns
//!
//! Any hunk that rewrites the `Type:` line of an existing field:
//!
//! ```text
//!  "tags": {
//! -    Type: schema.TypeMap,
//! +    Type: schema.TypeList,
//! ```

use schema_lint_core::{Field, HunkContext, Rule, Severity, Suggestion, Violation, ViolationKind};
use tracing::debug;

/// Rule code for type-changed.
pub const CODE: &str = "SL002";

/// Rule name for type-changed.
pub const NAME: &str = "type-changed";

/// Flags a field whose `Type:` declaration was rewritten.
#[derive(Debug, Clone)]
pub struct TypeChanged {
    /// Severity level.
    pub severity: Severity,
}

impl Default for TypeChanged {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChanged {
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

impl Rule for TypeChanged {
    fn kind(&self) -> ViolationKind {
        ViolationKind::TypeChanged
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &HunkContext, before: &Field, after: Option<&Field>) -> Option<Violation> {
        let after = after?;
        let (Some(old), Some(new)) = (&before.field_type, &after.field_type) else {
            return None;
        };

        debug!("{NAME}: `{}` {old} -> {new}", before.name);
        Some(
            ctx.violation(self.kind(), before, Some(after))
                .with_suggestion(Suggestion::new(format!(
                    "Keep `{}` as {old} and add a new field of type {new} instead",
                    before.name
                ))),
        )
    }
}
