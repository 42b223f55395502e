//! Rule presets for common configurations.

use crate::{BecameForceNew, EnumShrunk, OptionalToRequired, TypeChanged};
use schema_lint_core::{RuleBox, Severity};

/// Preset configurations for schema-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule at error severity.
    Recommended,
    /// Every rule, with `became-force-new` reported as a warning.
    Lenient,
}

impl Preset {
    /// Every preset, in the order they are listed.
    pub const ALL: [Self; 2] = [Self::Recommended, Self::Lenient];

    /// Name used on the command line and in `preset = "..."`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Lenient => "lenient",
        }
    }

    /// One-line summary for `list-rules`.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Recommended => "SL001-SL004 at error severity (default)",
            Self::Lenient => "SL003 reported as a warning",
        }
    }

    /// Looks a preset up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Lenient => lenient_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `optional-to-required` (SL001)
/// - `type-changed` (SL002)
/// - `became-force-new` (SL003)
/// - `enum-shrunk` (SL004)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns every rule, downgrading `became-force-new` to a warning.
///
/// For providers that review ForceNew changes by hand.
#[must_use]
pub fn lenient_rules() -> Vec<RuleBox> {
    vec![
        Box::new(OptionalToRequired::new()),
        Box::new(TypeChanged::new()),
        Box::new(BecameForceNew::new().severity(Severity::Warning)),
        Box::new(EnumShrunk::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(OptionalToRequired::new()),
        Box::new(TypeChanged::new()),
        Box::new(BecameForceNew::new()),
        Box::new(EnumShrunk::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 4);
        assert_eq!(Preset::Lenient.rules().len(), 4);
    }

    #[test]
    fn test_preset_lookup_by_name() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("strict"), None);
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = all_rules().iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_lenient_force_new_is_warning() {
        let rules = lenient_rules();
        let force_new = rules.iter().find(|r| r.name() == "became-force-new").unwrap();
        assert_eq!(force_new.default_severity(), Severity::Warning);
        assert!(!force_new.requires_allow_reason());
    }
}
