//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/schema-lint.toml` or `.schema-lint.toml`
//! 3. The same names in each parent directory, up to the repository root
//!    (the first directory holding `.git`)
//! 4. `$SCHEMA_LINT_CONFIG_DIR/config.toml` or `~/.schema-lint/config.toml`
//! 5. No config found → defaults
//!
//! The checker is usually started from the provider repository root, but CI
//! jobs sometimes run it from a package directory such as `alicloud/`. A
//! config found in a parent directory anchors the relative `[docs] dir`.

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in a parent of the project directory.
    Ancestor(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Ancestor(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Directory that relative paths in the config are anchored to, when it
    /// is not the working directory.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            Self::Ancestor(p) => p.parent(),
            _ => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["schema-lint.toml", ".schema-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "SCHEMA_LINT_CONFIG_DIR";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Takes `global_dir` as a parameter so tests need not touch the environment.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = project_config_in(project_dir) {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    if let Some(candidate) = find_in_parents(project_dir) {
        tracing::debug!("Found config in parent directory: {}", candidate.display());
        return ConfigSource::Ancestor(candidate);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|c| c.exists())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

fn project_config_in(dir: &Path) -> Option<PathBuf> {
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|c| c.exists())
}

/// Walks up from `project_dir` with relative `..` steps so that anchored
/// paths stay relative to the working directory.
fn find_in_parents(project_dir: &Path) -> Option<PathBuf> {
    if project_dir.join(".git").exists() {
        return None;
    }
    let depth = project_dir
        .canonicalize()
        .map_or(0, |p| p.ancestors().count().saturating_sub(1));

    let mut dir = project_dir.to_path_buf();
    for _ in 0..depth {
        dir.push("..");
        if let Some(candidate) = project_config_in(&dir) {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            tracing::debug!("Stopped config search at repository root {}", dir.display());
            break;
        }
    }
    None
}

/// Returns the global config directory path.
///
/// Resolution: `$SCHEMA_LINT_CONFIG_DIR` > `~/.schema-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".schema-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("schema-lint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".schema-lint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".schema-lint.toml"))
        );

        fs::write(tmp.path().join("schema-lint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("schema-lint.toml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);

        fs::write(global.path().join("config.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.is_global());
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("schema-lint.toml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn parent_config_found_from_package_directory() {
        let repo = TempDir::new().unwrap();
        fs::create_dir(repo.path().join(".git")).unwrap();
        fs::write(repo.path().join("schema-lint.toml"), "").unwrap();
        let package = repo.path().join("alicloud");
        fs::create_dir(&package).unwrap();

        let result = resolve_inner(&package, None, None);
        let expected = package.join("..").join("schema-lint.toml");
        assert_eq!(result, ConfigSource::Ancestor(expected));
        assert_eq!(result.base_dir(), Some(package.join("..").as_path()));
    }

    #[test]
    fn search_stops_at_repository_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("schema-lint.toml"), "").unwrap();
        let repo = outer.path().join("provider");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let package = repo.join("alicloud");
        fs::create_dir(&package).unwrap();

        assert_eq!(resolve_inner(&package, None, None), ConfigSource::Default);
        assert_eq!(resolve_inner(&repo, None, None), ConfigSource::Default);
    }

    #[test]
    fn project_config_has_no_base_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("schema-lint.toml"), "").unwrap();
        assert!(resolve_inner(tmp.path(), None, None).base_dir().is_none());
    }

    #[test]
    fn default_has_no_path() {
        assert!(ConfigSource::Default.path().is_none());
        assert!(!ConfigSource::Default.is_global());
    }
}
