//! Configuration file resolution with global fallback.
//!
//! The configuration is looked up in a fixed order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/depcheck.toml` or `{project}/.depcheck.toml`
//! 3. `$DEPCHECK_CONFIG_DIR/config.toml` or `~/.depcheck/config.toml`
//! 4. Nothing found: no rules, every file passes

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use depcheck_core::Config;

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["depcheck.toml", ".depcheck.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "DEPCHECK_CONFIG_DIR";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Missing,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Missing => None,
        }
    }

    /// Reads and parses the configuration.
    ///
    /// [`ConfigSource::Missing`] yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::info!("No depcheck.toml found; running without rules");
            return Ok(Config::new());
        };

        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }

        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{}", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Missing => f.write_str("no configuration file"),
        }
    }
}

/// Resolves the configuration for a project directory.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_with(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Missing,
    }
}

/// Returns the global config directory: `$DEPCHECK_CONFIG_DIR`, else `~/.depcheck/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".depcheck"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RULES: &str = "[[deny]]\nfrom = \".*\"\nto = \"legacy\"\n";

    #[test]
    fn explicit_wins_even_if_missing() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("depcheck.toml"), "").unwrap();

        let source = resolve_with(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            source,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
        assert!(source.load().is_err());
    }

    #[test]
    fn project_config_names_in_order() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".depcheck.toml"), "").unwrap();
        assert_eq!(
            resolve_with(project.path(), None, None),
            ConfigSource::Project(project.path().join(".depcheck.toml"))
        );

        fs::write(project.path().join("depcheck.toml"), "").unwrap();
        assert_eq!(
            resolve_with(project.path(), None, None),
            ConfigSource::Project(project.path().join("depcheck.toml"))
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("depcheck.toml")).unwrap();
        assert_eq!(resolve_with(project.path(), None, None), ConfigSource::Missing);
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), RULES).unwrap();

        let source = resolve_with(project.path(), None, Some(global.path()));
        assert_eq!(
            source,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert_eq!(source.load().unwrap().rules().deny.len(), 1);

        fs::write(project.path().join("depcheck.toml"), "").unwrap();
        let source = resolve_with(project.path(), None, Some(global.path()));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_means_no_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(
            resolve_with(project.path(), None, Some(global.path())),
            ConfigSource::Missing
        );
    }

    #[test]
    fn no_config_loads_empty_rules() {
        let config = ConfigSource::Missing.load().unwrap();
        assert!(config.rules().is_empty());
    }

    #[test]
    fn invalid_toml_reports_the_path() {
        let project = TempDir::new().unwrap();
        let path = project.path().join("depcheck.toml");
        fs::write(&path, "[[deny]]\nform = \".*\"\n").unwrap();

        let err = ConfigSource::Project(path.clone()).load().unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn display_names_the_origin() {
        let p = PathBuf::from("/etc/x.toml");
        assert_eq!(
            ConfigSource::Explicit(p.clone()).to_string(),
            "/etc/x.toml (--config)"
        );
        assert_eq!(ConfigSource::Global(p).to_string(), "/etc/x.toml (global)");
        assert_eq!(ConfigSource::Missing.to_string(), "no configuration file");
    }
}
