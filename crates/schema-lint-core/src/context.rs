//! Context types for rule execution.

use crate::field::Field;
use crate::types::{Location, Violation, ViolationKind};

/// Context provided to compatibility rules for one hunk.
#[derive(Debug, Clone, Copy)]
pub struct HunkContext<'a> {
    /// File the hunk belongs to (its new name); also the violation context.
    pub file: &'a str,
}

impl<'a> HunkContext<'a> {
    /// Creates a context for a hunk of `file`.
    #[must_use]
    pub fn new(file: &'a str) -> Self {
        Self { file }
    }

    /// Builds a violation for `before`, located at the field's new-side
    /// declaration when there is one.
    #[must_use]
    pub fn violation(
        &self,
        kind: ViolationKind,
        before: &Field,
        after: Option<&Field>,
    ) -> Violation {
        let line = after
            .map(|f| f.line)
            .filter(|l| *l > 0)
            .unwrap_or(before.line);
        Violation::new(
            kind,
            before.name.as_str(),
            self.file,
            Location::new(self.file, line),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_prefers_after_line() {
        let ctx = HunkContext::new("alicloud/resource_alicloud_vpc.go");
        let before = Field::new("region").at_line(10);
        let after = Field::new("region").at_line(12);

        let v = ctx.violation(ViolationKind::TypeChanged, &before, Some(&after));
        assert_eq!(v.location.line, 12);
        assert_eq!(v.context, "alicloud/resource_alicloud_vpc.go");

        let v = ctx.violation(ViolationKind::TypeChanged, &before, None);
        assert_eq!(v.location.line, 10);
    }
}
