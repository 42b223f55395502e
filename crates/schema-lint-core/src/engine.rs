//! Backward-compatibility evaluation of one hunk.

use crate::allowance::AllowCheck;
use crate::context::HunkContext;
use crate::field::{Field, FieldSet};
use crate::rule::{Rule, RuleBox};
use crate::types::{Severity, Suggestion, Violation};
use tracing::debug;

/// Applies a set of compatibility rules to the before and after field sets
/// of a hunk.
///
/// Only fields present on the before side are judged. A field the hunk
/// introduced has nothing to be compatible with.
#[derive(Default)]
pub struct CompatibilityRuleEngine {
    rules: Vec<RuleBox>,
}

impl CompatibilityRuleEngine {
    /// Creates an engine with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine from boxed rules.
    #[must_use]
    pub fn with_rules(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// Adds a rule.
    pub fn push(&mut self, rule: RuleBox) {
        self.rules.push(rule);
    }

    /// Registered rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Evaluates every rule against every before-side field.
    #[must_use]
    pub fn evaluate(
        &self,
        ctx: &HunkContext,
        before: &FieldSet,
        after: &FieldSet,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        for old in before {
            let new = after.get(&old.name);
            for rule in &self.rules {
                let Some(violation) = rule.check(ctx, old, new) else {
                    continue;
                };
                let violation = violation.with_severity(rule.default_severity());

                match allowance(rule.as_ref(), new) {
                    AllowCheck::Denied => violations.push(violation),
                    AllowCheck::Allowed { reason: Some(reason) } => {
                        debug!("{} on `{}` allowed: {reason}", rule.name(), old.name);
                    }
                    AllowCheck::Allowed { reason: None } if rule.requires_allow_reason() => {
                        let message = format!(
                            "Allow directive for '{}' on `{}` is missing required reason",
                            rule.name(),
                            old.name
                        );
                        violations.push(
                            violation
                                .with_severity(Severity::Warning)
                                .with_message(message)
                                .with_suggestion(Suggestion::new(
                                    "Add reason=\"...\" to explain why this change is safe",
                                )),
                        );
                    }
                    AllowCheck::Allowed { reason: None } => {
                        debug!("{} on `{}` allowed", rule.name(), old.name);
                    }
                }
            }
        }

        violations
    }
}

fn allowance(rule: &dyn Rule, after: Option<&Field>) -> AllowCheck {
    let Some(field) = after else {
        return AllowCheck::Denied;
    };
    match field.allow_check(rule.name()) {
        AllowCheck::Denied => field.allow_check(rule.code()),
        allowed => allowed,
    }
}
