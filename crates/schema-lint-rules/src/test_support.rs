//! Helpers for driving a single rule from diff text.

use schema_lint_core::{
    CompatibilityRuleEngine, FieldAttributeExtractor, HunkContext, Patch, Rule, Violation,
};

pub const FILE: &str = "alicloud/resource_alicloud_vpc.go";

/// Wraps hunk body lines in a one-file patch with a matching header.
pub fn patch(body: &str) -> String {
    let old = body.lines().filter(|l| !l.starts_with('+')).count();
    let new = body.lines().filter(|l| !l.starts_with('-')).count();
    format!("--- a/{FILE}\n+++ b/{FILE}\n@@ -20,{old} +20,{new} @@\n{body}")
}

/// Runs `rule` over the first hunk of a patch built from `body`.
pub fn check<R: Rule + Clone + 'static>(rule: &R, body: &str) -> Vec<Violation> {
    let parsed = Patch::parse(&patch(body)).expect("Failed to parse patch");
    let hunk = &parsed.files[0].hunks[0];
    let (before, after) = FieldAttributeExtractor::new().extract_hunk(hunk);
    let engine = CompatibilityRuleEngine::with_rules(vec![Box::new(rule.clone())]);
    engine.evaluate(&HunkContext::new(FILE), &before, &after)
}
