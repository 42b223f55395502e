//! Schema versus documentation consistency.

use crate::field::{Field, FieldSet, ID_FIELD};
use crate::types::{Location, Violation, ViolationKind};
use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of comparing one document against one schema.
#[derive(Debug, Default)]
pub struct ConsistencyReport {
    /// True when the document and schema disagree.
    pub inconsistent: bool,
    /// Whether the per-field flag comparison ran.
    pub compared_flags: bool,
    /// Every disagreement found.
    pub violations: Vec<Violation>,
}

/// Compares documented fields against the schema a provider registers.
///
/// The schema never lists the implicit `id` attribute; the document must.
#[derive(Debug, Clone)]
pub struct SchemaDocConsistencyChecker {
    resource: String,
    doc_path: PathBuf,
}

impl SchemaDocConsistencyChecker {
    /// Creates a checker for one resource and its document.
    #[must_use]
    pub fn new(resource: impl Into<String>, doc_path: impl Into<PathBuf>) -> Self {
        Self {
            resource: resource.into(),
            doc_path: doc_path.into(),
        }
    }

    /// Runs the comparison.
    ///
    /// When the field counts differ (schema plus `id` versus document) only
    /// the fields missing on either side are reported; flags are not compared.
    #[must_use]
    pub fn check(&self, doc: &FieldSet, schema: &FieldSet) -> ConsistencyReport {
        let expected = schema.len() + usize::from(!schema.contains(ID_FIELD));
        let mut report = ConsistencyReport::default();

        report.violations.extend(self.set_difference(doc, schema));

        if expected == doc.len() {
            report.compared_flags = true;
            for doc_field in doc {
                if let Some(schema_field) = schema.get(&doc_field.name) {
                    report
                        .violations
                        .extend(self.compare_flags(doc_field, schema_field));
                }
            }
        } else {
            info!(
                "{}: schema has {expected} field(s) including id, document has {}",
                self.resource,
                doc.len()
            );
        }

        report.inconsistent = expected != doc.len() || !report.violations.is_empty();
        report
    }

    fn set_difference(&self, doc: &FieldSet, schema: &FieldSet) -> Vec<Violation> {
        let mut violations = Vec::new();

        for field in doc {
            if field.name != ID_FIELD && !schema.contains(&field.name) {
                debug!("`{}` is documented but not in the schema", field.name);
                violations.push(self.violation(
                    ViolationKind::ExtraDocField,
                    &field.name,
                    field.line,
                ));
            }
        }

        let implicit_id = (!schema.contains(ID_FIELD)).then_some(ID_FIELD);
        for name in schema.names().chain(implicit_id) {
            if !doc.contains(name) {
                debug!("`{name}` is in the schema but not documented");
                violations.push(self.violation(ViolationKind::MissingDocField, name, 0));
            }
        }

        violations
    }

    fn compare_flags(&self, doc: &Field, schema: &Field) -> Vec<Violation> {
        let checks = [
            (doc.is_optional(), schema.is_optional(), ViolationKind::WrongOptionalFlag),
            (doc.is_required(), schema.is_required(), ViolationKind::WrongRequiredFlag),
            (doc.is_force_new(), schema.is_force_new(), ViolationKind::WrongForceNewFlag),
        ];

        checks
            .into_iter()
            .filter(|(claimed, actual, _)| *claimed && !*actual)
            .map(|(_, _, kind)| self.violation(kind, &doc.name, doc.line))
            .collect()
    }

    fn violation(&self, kind: ViolationKind, field: &str, line: usize) -> Violation {
        Violation::new(
            kind,
            field,
            self.resource.as_str(),
            Location::new(self.doc_path.clone(), line),
        )
    }
}
