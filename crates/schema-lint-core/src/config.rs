//! Configuration types for schema-lint.

use crate::types::{Severity, UnknownSeverity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration for schema-lint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider namespace resource names are prefixed with.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Compat rule preset ("recommended" or "lenient").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Severity threshold for failing a check (default: "error").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Which patched files are checked.
    #[serde(default)]
    pub patch: PatchConfig,

    /// Where resource documents live.
    #[serde(default)]
    pub docs: DocsConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            preset: None,
            fail_on: None,
            patch: PatchConfig::default(),
            docs: DocsConfig::default(),
            rules: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Effective failure threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `fail_on` is not a known severity.
    pub fn fail_on(&self) -> Result<Severity, ConfigError> {
        self.fail_on
            .as_deref()
            .map_or(Ok(Severity::Error), str::parse)
            .map_err(ConfigError::from)
    }
}

fn default_provider() -> String {
    "alicloud".to_string()
}

/// Selection of patched files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Glob patterns a file's new name must match.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Glob patterns that exclude a file even if included.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

fn default_include() -> Vec<String> {
    vec!["**/resource_*.go".to_string(), "resource_*.go".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/*_test.go".to_string(), "*_test.go".to_string()]
}

/// Location of resource documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Directory holding one document per resource.
    #[serde(default = "default_docs_dir")]
    pub dir: PathBuf,

    /// File extension appended to the resource type.
    #[serde(default = "default_docs_extension")]
    pub extension: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            extension: default_docs_extension(),
        }
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("website/docs/r")
}

fn default_docs_extension() -> String {
    ".html.markdown".to_string()
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Invalid severity value.
    #[error(transparent)]
    Severity(#[from] UnknownSeverity),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider, "alicloud");
        assert_eq!(config.docs.dir, PathBuf::from("website/docs/r"));
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on().unwrap(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
provider = "examplecloud"
preset = "lenient"
fail_on = "warning"

[patch]
include = ["provider/resource_*.go"]

[docs]
dir = "docs/resources"
extension = ".md"

[rules.became-force-new]
severity = "warning"

[rules.type-changed]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.provider, "examplecloud");
        assert_eq!(config.preset.as_deref(), Some("lenient"));
        assert_eq!(config.fail_on().unwrap(), Severity::Warning);
        assert_eq!(config.patch.include, ["provider/resource_*.go"]);
        assert_eq!(config.patch.exclude, default_exclude());
        assert_eq!(config.docs.extension, ".md");
        assert!(!config.is_rule_enabled("type-changed"));
        assert!(config.is_rule_enabled("enum-shrunk"));
        assert_eq!(
            config.rule_severity("became-force-new"),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_invalid_fail_on() {
        let config = Config::parse(r#"fail_on = "critical""#).unwrap();
        assert!(matches!(config.fail_on(), Err(ConfigError::Severity(_))));
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let mut config = Config::new();
        config.rules.insert(
            "enum-shrunk".to_string(),
            RuleConfig {
                enabled: Some(false),
                severity: None,
            },
        );
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert!(!parsed.is_rule_enabled("enum-shrunk"));
        assert_eq!(parsed.docs.extension, ".html.markdown");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("provider = "),
            Err(ConfigError::Parse { .. })
        ));
    }
}
