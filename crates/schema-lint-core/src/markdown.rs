//! Documentation page extraction.
//!
//! A resource page lists its user-settable fields under
//! `## Argument Reference` and its computed fields under
//! `## Attributes Reference`, one markdown bullet per field:
//!
//! ```text
//! * `name` - (Required, ForceNew) The name of the VPC.
//! * `status` - The status of the VPC.
//! ```

use crate::field::{Field, Resource};
use crate::patterns;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const ARGUMENTS_HEADING: &str = "## Argument Reference";
const ATTRIBUTES_HEADING: &str = "## Attributes Reference";

/// Raised when a resource name cannot be mapped to or from a document.
#[derive(Debug, Error)]
pub enum ResourceNameError {
    /// The name lacks the `<provider>_` prefix or has nothing after it.
    #[error("the resource name parsed failed: `{name}` is not of the form `{provider}_<type>`")]
    MissingProvider {
        /// Resource name as given.
        name: String,
        /// Expected provider namespace.
        provider: String,
    },

    /// The document's file name does not start with a resource type.
    #[error("the resource name parsed failed: no resource type in `{}`", .path.display())]
    UnresolvablePath {
        /// Document path.
        path: PathBuf,
    },
}

/// Which reference section the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Arguments { level: usize },
    Attributes { level: usize },
}

/// Turns a resource documentation page into argument and attribute sets.
#[derive(Debug, Clone)]
pub struct DocumentationExtractor {
    provider: String,
}

impl DocumentationExtractor {
    /// Creates an extractor for one provider namespace (e.g. `alicloud`).
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    /// Provider namespace.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Locates the document of `resource_name` under `docs_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceNameError::MissingProvider`] when the name does not
    /// carry the provider prefix.
    pub fn doc_path(
        &self,
        resource_name: &str,
        docs_dir: &Path,
        extension: &str,
    ) -> Result<PathBuf, ResourceNameError> {
        let prefix = format!("{}_", self.provider);
        let suffix = resource_name
            .strip_prefix(&prefix)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ResourceNameError::MissingProvider {
                name: resource_name.to_string(),
                provider: self.provider.clone(),
            })?;
        Ok(docs_dir.join(format!("{suffix}{extension}")))
    }

    /// Derives `<provider>_<type>` from a document path such as
    /// `website/docs/r/vpc.html.markdown`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceNameError::UnresolvablePath`] when the file name does
    /// not begin with a resource type.
    pub fn resource_name_from_path(&self, path: &Path) -> Result<String, ResourceNameError> {
        let base = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let stem: String = base
            .chars()
            .take_while(|c| c.is_ascii_alphabetic() || *c == '_')
            .collect();
        if stem.is_empty() {
            return Err(ResourceNameError::UnresolvablePath {
                path: path.to_path_buf(),
            });
        }
        Ok(format!("{}_{stem}", self.provider))
    }

    /// Extracts a resource from document text.
    #[must_use]
    pub fn extract(&self, name: impl Into<String>, text: &str) -> Resource {
        let mut resource = Resource::new(name);
        let mut section = Section::Outside;
        let mut in_fence = false;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            let trimmed = line.trim_end();
            if trimmed == ARGUMENTS_HEADING {
                section = Section::Arguments { level: 2 };
                continue;
            }
            if trimmed == ATTRIBUTES_HEADING {
                section = Section::Attributes { level: 2 };
                continue;
            }

            if let Some(caps) = patterns::heading().captures(trimmed) {
                let level = caps[1].len();
                match section {
                    Section::Arguments { level: open } | Section::Attributes { level: open }
                        if level <= open =>
                    {
                        debug!("Leaving reference section at line {line_no}");
                        section = Section::Outside;
                    }
                    _ => {}
                }
                continue;
            }

            match section {
                Section::Arguments { .. } => {
                    if let Some(field) = parse_argument(trimmed, line_no) {
                        resource.arguments.insert(field);
                    }
                }
                Section::Attributes { .. } => {
                    if let Some(field) = parse_attribute(trimmed, line_no) {
                        resource.attributes.insert(field);
                    }
                }
                Section::Outside => {}
            }
        }

        debug!(
            "Extracted {} argument(s) and {} attribute(s) for {}",
            resource.arguments.len(),
            resource.attributes.len(),
            resource.name
        );
        resource
    }
}

fn parse_argument(line: &str, line_no: usize) -> Option<Field> {
    let caps = patterns::argument_bullet().captures(line)?;
    let mut field = Field::new(&caps[1]).at_line(line_no);

    if let Some(modifier) = caps.get(2).map(|m| m.as_str()) {
        if modifier.contains("Optional") {
            field.optional = Some(true);
        }
        if modifier.contains("Required") {
            field.required = Some(true);
        }
        if modifier.contains("ForceNew") {
            field.force_new = Some(true);
        }
    }
    field.description = caps.get(3).map(|m| m.as_str().trim().to_string());
    Some(field)
}

fn parse_attribute(line: &str, line_no: usize) -> Option<Field> {
    let caps = patterns::attribute_bullet().captures(line)?;
    let mut field = Field::new(&caps[1]).at_line(line_no);
    field.description = caps.get(2).map(|m| m.as_str().trim().to_string());
    Some(field)
}
