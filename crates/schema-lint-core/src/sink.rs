//! Diagnostic sinks: where violations go once a check has produced them.

use crate::types::{LintResult, Severity, Violation};
use tracing::{error, info, warn};

/// Receives structured violations from a finished check.
pub trait DiagnosticSink {
    /// Reports a single violation.
    fn report(&mut self, violation: &Violation);

    /// Called once after every violation has been reported.
    fn finish(&mut self, _result: &LintResult) {}
}

impl LintResult {
    /// Sends every violation, then the summary, to `sink`.
    pub fn emit(&self, sink: &mut dyn DiagnosticSink) {
        for violation in &self.violations {
            sink.report(violation);
        }
        sink.finish(self);
    }
}

/// Emits each violation as a `tracing` event at its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, v: &Violation) {
        let code = v.code();
        let location = v.location.to_string();
        match v.severity {
            Severity::Error => error!(code, field = %v.field, %location, "{}", v.message),
            Severity::Warning => warn!(code, field = %v.field, %location, "{}", v.message),
            Severity::Info => info!(code, field = %v.field, %location, "{}", v.message),
        }
    }

    fn finish(&mut self, result: &LintResult) {
        let (errors, warnings, infos) = result.count_by_severity();
        info!(
            errors,
            warnings,
            infos,
            files = result.files_checked,
            hunks = result.hunks_checked,
            "check finished"
        );
    }
}

/// Keeps reported violations in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Violations in report order.
    pub violations: Vec<Violation>,
    /// Whether `finish` was called.
    pub finished: bool,
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, violation: &Violation) {
        self.violations.push(violation.clone());
    }

    fn finish(&mut self, _result: &LintResult) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, ViolationKind};

    #[test]
    fn emit_reports_then_finishes() {
        let mut result = LintResult::new();
        result.violations.push(Violation::new(
            ViolationKind::EnumShrunk,
            "status",
            "resource_alicloud_vpc.go",
            Location::new("resource_alicloud_vpc.go", 3),
        ));

        let mut sink = CollectingSink::default();
        result.emit(&mut sink);
        assert_eq!(sink.violations.len(), 1);
        assert!(sink.finished);

        // Must not panic without a subscriber installed.
        result.emit(&mut TracingSink);
    }
}
