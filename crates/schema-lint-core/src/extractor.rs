//! Field attribute extraction from diff hunks.
//!
//! Each side of a hunk is scanned line by line. A quoted field name moves the
//! cursor; attribute lines are attached to the field under the cursor, but
//! only when the line is part of the edit. Context lines that do not name a
//! field are never inspected, so fields untouched by the diff stay invisible.

use crate::allowance::{parse_allow_directive, AllowDirective};
use crate::diff::{DiffLine, Hunk, Side};
use crate::field::{Field, FieldSet};
use crate::patterns;
use tracing::debug;

/// Attribute kinds a schema declaration line can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `"name"` opening a field.
    FieldNameOpen,
    /// `Type:`
    Type,
    /// `Optional:`
    Optional,
    /// `Required:`
    Required,
    /// `ForceNew:`
    ForceNew,
    /// `ValidateFunc: StringInSlice(...)`
    ValidateValues,
    /// `// schema-lint: allow(...)`
    AllowDirective,
}

impl AttributeKind {
    /// Kinds in the order lines are tested against them.
    pub const ALL: [Self; 7] = [
        Self::FieldNameOpen,
        Self::Type,
        Self::Optional,
        Self::Required,
        Self::ForceNew,
        Self::ValidateValues,
        Self::AllowDirective,
    ];

    /// Tests one line against this kind's keyword contract.
    #[must_use]
    pub fn matches(self, line: &str) -> Option<LineMatch> {
        let capture = |re: &regex::Regex| {
            re.captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        };

        match self {
            Self::FieldNameOpen => capture(patterns::field_name()).map(LineMatch::FieldNameOpen),
            Self::Type => capture(patterns::field_type()).map(LineMatch::Type),
            Self::Optional => {
                capture(patterns::optional()).map(|v| LineMatch::Optional(parse_bool(&v)))
            }
            Self::Required => {
                capture(patterns::required()).map(|v| LineMatch::Required(parse_bool(&v)))
            }
            Self::ForceNew => {
                capture(patterns::force_new()).map(|v| LineMatch::ForceNew(parse_bool(&v)))
            }
            Self::ValidateValues => capture(patterns::validate_values())
                .map(|v| LineMatch::ValidateValues(split_values(&v))),
            Self::AllowDirective => parse_allow_directive(line).map(LineMatch::Allow),
        }
    }
}

/// What a single line contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Cursor moves to this field.
    FieldNameOpen(String),
    /// Declared type.
    Type(String),
    /// Declared optional flag.
    Optional(bool),
    /// Declared required flag.
    Required(bool),
    /// Declared force-new flag.
    ForceNew(bool),
    /// Enumerated validation values.
    ValidateValues(Vec<String>),
    /// Manual override for one or more rules.
    Allow(AllowDirective),
}

/// Classifies a line by the first attribute kind that matches.
#[must_use]
pub fn classify(line: &str) -> Option<LineMatch> {
    AttributeKind::ALL.into_iter().find_map(|k| k.matches(line))
}

/// Boolean literal parsing. Anything unrecognised reads as `false`.
fn parse_bool(value: &str) -> bool {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        other => {
            debug!("Malformed boolean literal `{other}`, treating as false");
            false
        }
    }
}

fn split_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|v| v.trim().trim_matches('"').trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

/// Cursor state while scanning one side of a hunk.
#[derive(Debug, Default)]
enum CursorState {
    #[default]
    NoCurrentField,
    AccumulatingField(Field),
}

/// Accumulates fields while the cursor walks a hunk side.
#[derive(Debug, Default)]
struct FieldAccumulator {
    state: CursorState,
    fields: FieldSet,
}

impl FieldAccumulator {
    fn open(&mut self, name: String, line: usize) {
        match std::mem::take(&mut self.state) {
            CursorState::AccumulatingField(pending) if pending.name == name => {
                self.state = CursorState::AccumulatingField(pending);
                return;
            }
            CursorState::AccumulatingField(pending) => {
                debug!("Committing field `{}`", pending.name);
                self.fields.insert(pending);
            }
            CursorState::NoCurrentField => {}
        }
        self.state = CursorState::AccumulatingField(Field::new(name).at_line(line));
    }

    fn apply(&mut self, found: LineMatch) {
        let CursorState::AccumulatingField(field) = &mut self.state else {
            debug!("Discarding {found:?} seen before any field name");
            return;
        };

        match found {
            LineMatch::FieldNameOpen(_) => {}
            LineMatch::Type(kind) => field.field_type = Some(kind),
            LineMatch::Optional(v) => field.optional = Some(v),
            LineMatch::Required(v) => field.required = Some(v),
            LineMatch::ForceNew(v) => field.force_new = Some(v),
            LineMatch::ValidateValues(values) => field.enum_values = Some(values),
            LineMatch::Allow(directive) => field.allows.push(directive),
        }
    }

    fn finish(mut self) -> FieldSet {
        if let CursorState::AccumulatingField(pending) = self.state {
            if pending.attribute_count() > 0 {
                self.fields.insert(pending);
            }
        }
        self.fields
    }
}

/// Turns hunk lines into the set of fields the edit touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAttributeExtractor;

impl FieldAttributeExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extracts fields from the lines of one hunk side.
    ///
    /// `side` selects which line numbers are recorded on the fields.
    pub fn extract<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a DiffLine>,
        side: Side,
    ) -> FieldSet {
        let mut acc = FieldAccumulator::default();

        for line in lines {
            let Some(found) = classify(&line.content) else {
                continue;
            };

            if let LineMatch::FieldNameOpen(name) = found {
                acc.open(name, line.line_on(side).unwrap_or(0));
                continue;
            }

            if !line.is_changed() {
                continue;
            }
            acc.apply(found);
        }

        acc.finish()
    }

    /// Extracts the before and after field sets of a hunk.
    #[must_use]
    pub fn extract_hunk(&self, hunk: &Hunk) -> (FieldSet, FieldSet) {
        (
            self.extract(hunk.side(Side::Before), Side::Before),
            self.extract(hunk.side(Side::After), Side::After),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::LineMode;

    fn line(mode: LineMode, content: &str, n: usize) -> DiffLine {
        DiffLine {
            mode,
            content: content.to_string(),
            old_line: (mode != LineMode::Added).then_some(n),
            new_line: (mode != LineMode::Removed).then_some(n),
        }
    }

    fn extract(lines: &[DiffLine]) -> FieldSet {
        FieldAttributeExtractor::new().extract(lines, Side::After)
    }

    #[test]
    fn classify_recognises_each_keyword() {
        assert_eq!(classify("\t\"name\": {"), Some(LineMatch::FieldNameOpen("name".into())));
        assert_eq!(classify("\tType: schema.TypeInt,"), Some(LineMatch::Type("TypeInt".into())));
        assert_eq!(classify("\tOptional: true,"), Some(LineMatch::Optional(true)));
        assert_eq!(classify("\tRequired: True,"), Some(LineMatch::Required(true)));
        assert_eq!(classify("\tForceNew: false,"), Some(LineMatch::ForceNew(false)));
        assert_eq!(
            classify(
                r#"ValidateFunc: validation.StringInSlice([]string{"PrePaid", "PostPaid"}, false),"#
            ),
            Some(LineMatch::ValidateValues(vec!["PrePaid".into(), "PostPaid".into()]))
        );
        assert_eq!(classify("\tComputed: true,"), None);
    }

    #[test]
    fn malformed_boolean_reads_false() {
        assert_eq!(classify("Optional: yes,"), Some(LineMatch::Optional(false)));
    }

    #[test]
    fn no_field_names_yields_empty_set() {
        let lines = [
            line(LineMode::Removed, "\tOptional: true,", 3),
            line(LineMode::Added, "\tRequired: true,", 3),
        ];
        assert!(extract(&lines).is_empty());
    }

    #[test]
    fn context_attribute_lines_are_skipped() {
        let lines = [
            line(LineMode::Unchanged, "\t\"name\": {", 1),
            line(LineMode::Unchanged, "\t\tType: schema.TypeString,", 2),
            line(LineMode::Added, "\t\tForceNew: true,", 3),
        ];
        let fields = extract(&lines);
        let name = fields.get("name").unwrap();
        assert_eq!(name.field_type, None);
        assert_eq!(name.force_new, Some(true));
        assert_eq!(name.line, 1);
    }

    #[test]
    fn switching_fields_commits_the_pending_one() {
        let lines = [
            line(LineMode::Unchanged, "\t\"name\": {", 1),
            line(LineMode::Unchanged, "\t\"description\": {", 5),
            line(LineMode::Added, "\t\tOptional: true,", 6),
        ];
        let fields = extract(&lines);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("name").unwrap().attribute_count(), 0);
        assert!(fields.get("description").unwrap().is_optional());
    }

    #[test]
    fn trailing_field_without_attributes_is_dropped() {
        let lines = [
            line(LineMode::Added, "\t\"name\": {", 1),
            line(LineMode::Added, "\t\tRequired: true,", 2),
            line(LineMode::Unchanged, "\t\"zone\": {", 4),
        ];
        let fields = extract(&lines);
        assert!(fields.contains("name"));
        assert!(!fields.contains("zone"));
    }

    #[test]
    fn repeated_name_keeps_accumulating() {
        let lines = [
            line(LineMode::Added, "\t\"name\": {", 1),
            line(LineMode::Added, "\t\tType: schema.TypeString,", 2),
            line(LineMode::Added, "\t\"name\": {", 3),
            line(LineMode::Added, "\t\tRequired: true,", 4),
        ];
        let fields = extract(&lines);
        let name = fields.get("name").unwrap();
        assert_eq!(name.field_type.as_deref(), Some("TypeString"));
        assert!(name.is_required());
    }

    #[test]
    fn attributes_before_any_name_are_discarded() {
        let lines = [
            line(LineMode::Added, "\t\tRequired: true,", 1),
            line(LineMode::Added, "\t\"zone\": {", 2),
            line(LineMode::Added, "\t\tOptional: true,", 3),
        ];
        let zone = extract(&lines).get("zone").cloned().unwrap();
        assert_eq!(zone.required, None);
        assert!(zone.is_optional());
    }

    #[test]
    fn allow_directive_attaches_to_current_field() {
        let lines = [
            line(LineMode::Unchanged, "\t\"name\": {", 1),
            line(
                LineMode::Added,
                "\t\t// schema-lint: allow(became-force-new) reason=\"immutable upstream\"",
                2,
            ),
            line(LineMode::Added, "\t\tForceNew: true,", 3),
        ];
        let fields = extract(&lines);
        let check = fields.get("name").unwrap().allow_check("became-force-new");
        assert_eq!(check.reason(), Some("immutable upstream"));
    }

    #[test]
    fn extract_hunk_splits_sides() {
        let hunk = Hunk {
            old_range: crate::diff::HunkRange { start: 1, length: 3 },
            new_range: crate::diff::HunkRange { start: 1, length: 3 },
            section: None,
            lines: vec![
                line(LineMode::Unchanged, "\t\"region\": {", 1),
                line(LineMode::Removed, "\t\tOptional: true,", 2),
                line(LineMode::Added, "\t\tRequired: true,", 2),
                line(LineMode::Unchanged, "\t},", 3),
            ],
        };
        let (before, after) = FieldAttributeExtractor::new().extract_hunk(&hunk);
        assert!(before.get("region").unwrap().is_optional());
        assert_eq!(before.get("region").unwrap().required, None);
        assert!(after.get("region").unwrap().is_required());
    }

    #[test]
    fn extraction_is_deterministic() {
        let lines = [
            line(LineMode::Added, "\t\"a\": {", 1),
            line(LineMode::Added, "\t\tOptional: true,", 2),
            line(LineMode::Added, "\t\"b\": {", 3),
            line(LineMode::Added, "\t\tRequired: true,", 4),
        ];
        assert_eq!(extract(&lines), extract(&lines));
    }
}
