//! Rule forbidding the removal of accepted enumerated values.
//!
//! # Rationale
//!
//! Stored configurations may use a value the new release rejects.
//!
//! # Detected Patterns
//!
//! ```text
//! -    ValidateFunc: validation.StringInSlice([]string{"PayByTraffic", "PayByBandwidth"}, false),
//! +    ValidateFunc: validation.StringInSlice([]string{"PayByTraffic"}, false),
//! ```
//!
//! Only the number of values is compared; reordering or renaming one value
//! at equal length is not flagged.

use schema_lint_core::{Field, HunkContext, Rule, Severity, Suggestion, Violation, ViolationKind};
use tracing::debug;

/// Rule code for enum-shrunk.
pub const CODE: &str = "SL004";

/// Rule name for enum-shrunk.
pub const NAME: &str = "enum-shrunk";

/// Flags a field whose `StringInSlice` values got fewer.
#[derive(Debug, Clone)]
pub struct EnumShrunk {
    /// Severity level.
    pub severity: Severity,
}

impl Default for EnumShrunk {
    fn default() -> Self {
        Self::new()
    }
}

impl EnumShrunk {
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

impl Rule for EnumShrunk {
    fn kind(&self) -> ViolationKind {
        ViolationKind::EnumShrunk
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &HunkContext, before: &Field, after: Option<&Field>) -> Option<Violation> {
        let after = after?;
        let (Some(old), Some(new)) = (&before.enum_values, &after.enum_values) else {
            return None;
        };
        if new.len() >= old.len() {
            return None;
        }

        let removed: Vec<&str> = old
            .iter()
            .filter(|v| !new.contains(v))
            .map(String::as_str)
            .collect();
        debug!("{NAME}: `{}` lost {removed:?}", before.name);

        let violation = ctx.violation(self.kind(), before, Some(after));
        Some(if removed.is_empty() {
            violation
        } else {
            violation.with_suggestion(Suggestion::new(format!(
                "Keep accepting {}",
                removed.join(", ")
            )))
        })
    }
}
