//! Rule trait for backward-compatibility rules.

use crate::context::HunkContext;
use crate::field::Field;
use crate::types::{Severity, Violation, ViolationKind};

/// A backward-compatibility rule evaluated per field of a hunk.
///
/// The engine calls [`Rule::check`] once for every field present on the
/// before side, passing the same-named after-side field if the hunk has one.
///
/// # Example
///
/// ```ignore
/// use schema_lint_core::{Field, HunkContext, Rule, Violation, ViolationKind};
///
/// pub struct NoTypeRemoval;
///
/// impl Rule for NoTypeRemoval {
///     fn kind(&self) -> ViolationKind { ViolationKind::TypeChanged }
///
///     fn check(
///         &self,
///         ctx: &HunkContext,
///         before: &Field,
///         after: Option<&Field>,
///     ) -> Option<Violation> {
///         let dropped = after.map_or(true, |f| f.field_type.is_none());
///         (before.field_type.is_some() && dropped)
///             .then(|| ctx.violation(self.kind(), before, after))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// The violation kind this rule reports.
    fn kind(&self) -> ViolationKind;

    /// Returns the kebab-case name of this rule (e.g., "enum-shrunk").
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the rule code (e.g., "SL004").
    fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        self.kind().description()
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether an allow directive for this rule must state a reason.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks one field and returns a violation if the change is unsafe.
    fn check(&self, ctx: &HunkContext, before: &Field, after: Option<&Field>) -> Option<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
