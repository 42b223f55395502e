//! Structured resource schemas supplied by the provider.
//!
//! The checker never compiles the provider; the schema arrives as data. The
//! provided registry reads a JSON export shaped like:
//!
//! ```json
//! {
//!   "alicloud_vpc": {
//!     "name":   { "type": "TypeString", "required": true, "force_new": true },
//!     "status": { "type": "TypeString", "computed": true }
//!   }
//! }
//! ```

use crate::field::{Field, FieldSet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The registry file could not be read.
    #[error("Failed to read schema registry {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The registry is not valid JSON of the expected shape.
    #[error("Failed to parse schema registry: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can hand out the schema of a resource.
pub trait SchemaSource {
    /// Fields of `resource`, or `None` if the resource is unknown.
    fn resource_schema(&self, resource: &str) -> Option<FieldSet>;

    /// Every resource name this source knows, in order.
    fn resource_names(&self) -> Vec<String>;
}

/// Attribute flags of one schema field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaAttribute {
    /// Type tag.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    /// Optional flag.
    #[serde(alias = "Optional")]
    pub optional: bool,
    /// Required flag.
    #[serde(alias = "Required")]
    pub required: bool,
    /// Force-new flag.
    #[serde(alias = "ForceNew", alias = "forceNew")]
    pub force_new: bool,
    /// Computed flag.
    #[serde(alias = "Computed")]
    pub computed: bool,
}

impl SchemaAttribute {
    fn into_field(self, name: &str) -> Field {
        let mut field = Field::new(name);
        field.field_type = self.field_type;
        field.optional = self.optional.then_some(true);
        field.required = self.required.then_some(true);
        field.force_new = self.force_new.then_some(true);
        field.computed = self.computed.then_some(true);
        field
    }
}

/// Schema registry backed by a JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct JsonSchemaRegistry {
    resources: BTreeMap<String, BTreeMap<String, SchemaAttribute>>,
}

impl JsonSchemaRegistry {
    /// Parses a registry from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Number of resources in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl SchemaSource for JsonSchemaRegistry {
    fn resource_schema(&self, resource: &str) -> Option<FieldSet> {
        self.resources.get(resource).map(|fields| {
            fields
                .iter()
                .map(|(name, attr)| attr.clone().into_field(name))
                .collect()
        })
    }

    fn resource_names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }
}
