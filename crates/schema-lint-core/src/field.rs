//! Field model shared by the patch and documentation extractors.

use crate::allowance::{AllowCheck, AllowDirective};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The implicit identity attribute every resource has.
pub const ID_FIELD: &str = "id";

/// One schema field as seen by a hunk side, a document, or a schema registry.
///
/// Flags are tri-state: `None` means the attribute was not declared at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, never empty once inside a [`FieldSet`].
    pub name: String,
    /// Declared type tag (e.g. `TypeString`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// `Optional:` declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// `Required:` declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// `ForceNew:` declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_new: Option<bool>,
    /// `Computed:` declaration (schema registry only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<bool>,
    /// Allow-list of string values from a `StringInSlice` validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Free text from the documentation bullet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Line the field name was declared on (0 when unknown).
    #[serde(default)]
    pub line: usize,
    /// Allow directives seen inside the field's block.
    #[serde(default, skip)]
    pub allows: Vec<AllowDirective>,
}

impl Field {
    /// Creates a field with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the declaration line.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Number of attributes that were declared.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        [
            self.field_type.is_some(),
            self.optional.is_some(),
            self.required.is_some(),
            self.force_new.is_some(),
            self.computed.is_some(),
            self.enum_values.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// True when `Optional` is declared and true.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional == Some(true)
    }

    /// True when `Required` is declared and true.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }

    /// True when `ForceNew` is declared and true.
    #[must_use]
    pub fn is_force_new(&self) -> bool {
        self.force_new == Some(true)
    }

    /// Looks for an allow directive covering `rule_name`.
    #[must_use]
    pub fn allow_check(&self, rule_name: &str) -> AllowCheck {
        self.allows
            .iter()
            .find(|d| d.covers(rule_name))
            .map_or(AllowCheck::Denied, |d| AllowCheck::Allowed {
                reason: d.reason.clone(),
            })
    }
}

/// Mapping from field name to [`Field`]. Iterates in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeMap<String, Field>);

impl FieldSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any field with the same name.
    ///
    /// Fields with an empty name are ignored.
    pub fn insert(&mut self, field: Field) {
        if field.name.is_empty() {
            return;
        }
        self.0.insert(field.name.clone(), field);
    }

    /// Inserts a field only if its name is not taken yet.
    pub fn insert_if_absent(&mut self, field: Field) {
        if field.name.is_empty() {
            return;
        }
        self.0.entry(field.name.clone()).or_insert(field);
    }

    /// Gets a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.get(name)
    }

    /// Returns true if a field with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.values()
    }

    /// Iterates field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merges `others` into `self`; existing names are kept (first writer wins).
    pub fn merge_first_wins<'a>(&mut self, others: impl IntoIterator<Item = &'a FieldSet>) {
        for other in others {
            for field in other.iter() {
                self.insert_if_absent(field.clone());
            }
        }
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = Self::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::collections::btree_map::Values<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

/// A documented resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Canonical name, `provider_resourcetype`.
    pub name: String,
    /// User-settable fields.
    pub arguments: FieldSet,
    /// Computed/read-only fields.
    pub attributes: FieldSet,
}

impl Resource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Arguments and attributes in one set.
    ///
    /// Attributes are merged first, so on a name collision the attribute entry
    /// is the one kept.
    #[must_use]
    pub fn merged_fields(&self) -> FieldSet {
        let mut merged = FieldSet::new();
        merged.merge_first_wins([&self.attributes, &self.arguments]);
        merged
    }
}
