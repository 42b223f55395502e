//! Compiled line patterns.
//!
//! Every pattern is a literal, compiled once on first use.

use regex::Regex;
use std::sync::OnceLock;

macro_rules! pattern {
    ($(#[$meta:meta])* $name:ident => $re:expr) => {
        $(#[$meta])*
        pub(crate) fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| compile($re))
        }
    };
}

#[allow(clippy::expect_used)]
fn compile(re: &str) -> Regex {
    Regex::new(re).expect("built-in pattern is valid")
}

pattern!(
    /// `@@ -a[,b] +c[,d] @@ [section]`
    hunk_header => r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$"
);

pattern!(
    /// `"name":` opening a schema map entry.
    field_name => r#"^\s*"([A-Za-z0-9_]+)"\s*:"#
);

pattern!(
    /// `Type: schema.TypeString,`
    field_type => r"^\s*Type:\s+(?:schema\.)?([A-Za-z]+)"
);

pattern!(
    /// `Optional: true,`
    optional => r"^\s*Optional:\s+([A-Za-z0-9]*),"
);

pattern!(
    /// `Required: true,`
    required => r"^\s*Required:\s+([A-Za-z0-9]*),"
);

pattern!(
    /// `ForceNew: true,`
    force_new => r"^\s*ForceNew:\s+([A-Za-z0-9]*),"
);

pattern!(
    /// `ValidateFunc: validation.StringInSlice([]string{"a", "b"}, false),`
    validate_values =>
        r#"^\s*ValidateFunc:\s*(?:validation\.)?StringInSlice\(\[\]string\{([A-Za-z0-9_\-,"\s]*)"#
);

pattern!(
    /// Markdown heading; group 1 is the `#` run.
    heading => r"^(#{1,6})\s+(.*?)\s*$"
);

pattern!(
    /// ``* `name` - (Optional, ForceNew) The description.``
    argument_bullet => r"^[*-]\s+`([A-Za-z0-9_]+)`\s*-?\s*(?:\(([^)]*)\))?\s*(.*)$"
);

pattern!(
    /// ``* `name` - The description.``
    attribute_bullet => r"^[*-]\s+`([A-Za-z0-9_]+)`\s*-?\s*(.*)$"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_ignores_indentation() {
        let caps = field_name().captures("\t\t\t\"vswitch_id\": {").unwrap();
        assert_eq!(&caps[1], "vswitch_id");
        assert!(field_name().captures("\"\": {").is_none());
    }

    #[test]
    fn type_accepts_bare_and_qualified_kinds() {
        assert_eq!(&field_type().captures("\tType: schema.TypeMap,").unwrap()[1], "TypeMap");
        assert_eq!(&field_type().captures("Type: TypeList,").unwrap()[1], "TypeList");
    }

    #[test]
    fn argument_bullet_takes_first_modifier_group() {
        let caps = argument_bullet()
            .captures("* `name` - (Required, ForceNew) The name (unique per region).")
            .unwrap();
        assert_eq!(&caps[1], "name");
        assert_eq!(&caps[2], "Required, ForceNew");
        assert_eq!(&caps[3], "The name (unique per region).");
    }

    #[test]
    fn argument_bullet_modifier_is_optional() {
        let caps = argument_bullet().captures("* `tags` - A mapping of tags.").unwrap();
        assert!(caps.get(2).is_none());
        assert_eq!(&caps[3], "A mapping of tags.");
    }
}
