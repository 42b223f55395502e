//! # schema-lint-rules
//!
//! Built-in backward-compatibility rules for schema-lint.
//!
//! Each rule judges one field of a patch hunk, comparing the attributes the
//! hunk removed with the ones it added.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL001 | `optional-to-required` | An optional argument must not become required |
//! | SL002 | `type-changed` | A field's declared type must not change |
//! | SL003 | `became-force-new` | Touching `ForceNew` on an existing field needs review |
//! | SL004 | `enum-shrunk` | Accepted enumerated values must not be removed |
//!
//! ## Usage
//!
//! ```ignore
//! use schema_lint_core::Analyzer;
//! use schema_lint_rules::{OptionalToRequired, TypeChanged};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(OptionalToRequired::new())
//!     .rule(TypeChanged::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod became_force_new;
mod enum_shrunk;
mod optional_to_required;
mod presets;
mod type_changed;

#[cfg(test)]
mod test_support;

pub use became_force_new::BecameForceNew;
pub use enum_shrunk::EnumShrunk;
pub use optional_to_required::OptionalToRequired;
pub use presets::{all_rules, lenient_rules, recommended_rules, Preset};
pub use type_changed::TypeChanged;
