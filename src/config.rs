//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/clientreg/clientreg.toml`, or the file given with `--config`
//! 3. Environment variables: `CLIENTREG_*` prefix
//! 4. Command line: `--db`

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Default database file name inside the data directory.
pub const DB_FILE_NAME: &str = "clients.db";

/// Unified configuration for clientreg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// SQLite database file (default: `<data_dir>/clientreg/clients.db`)
    pub db_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub db_path: Option<PathBuf>,
}

/// Get the default database path.
///
/// Falls back to the working directory when no data directory is known.
fn default_db_path() -> PathBuf {
    ProjectDirs::from("", "", "clientreg")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

/// Get the XDG config directory for clientreg.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "clientreg").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("clientreg.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.db_path.to_string_lossy().as_ref());
        self.db_path = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            db_path: overlay
                .db_path
                .clone()
                .unwrap_or_else(|| self.db_path.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist. When `None`, the
    ///   global config file is used if present.
    ///
    /// The `--db` flag is applied by the caller via [`Settings::with_db_path`].
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply CLIENTREG_* environment variables as explicit overrides.
    ///
    /// `CLIENTREG_DB_PATH` maps to `db_path`; `__` separates nested keys.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CLIENTREG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("db_path") {
            settings.db_path = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Replace the database path (command line override).
    pub fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
            self.expand_paths();
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# clientreg configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/clientreg/clientreg.toml  (or --config <FILE>)
#   Env:  CLIENTREG_* environment variables (e.g. CLIENTREG_DB_PATH)
#   CLI:  --db <PATH>

# SQLite database file, ~ and $VAR are expanded
# db_path = "~/.local/share/clientreg/clients.db"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_db_file_is_clients_db() {
        let settings = Settings::default();
        assert_eq!(
            settings.db_path.file_name().and_then(|n| n.to_str()),
            Some(DB_FILE_NAME)
        );
    }

    #[test]
    fn given_tilde_in_db_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            db_path: PathBuf::from("~/clients.db"),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let db = settings.db_path.to_string_lossy();
        assert!(db.starts_with(&home), "db_path should start with home: {db}");
        assert!(!db.contains('~'), "db_path should not contain tilde: {db}");
    }

    #[test]
    fn given_overlay_without_db_path_when_merging_then_keeps_base() {
        let base = Settings {
            db_path: PathBuf::from("/data/base.db"),
        };
        let merged = base.merge_with(&RawSettings::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn given_overlay_with_db_path_when_merging_then_overlay_wins() {
        let base = Settings {
            db_path: PathBuf::from("/data/base.db"),
        };
        let overlay = RawSettings {
            db_path: Some(PathBuf::from("/data/other.db")),
        };
        assert_eq!(
            base.merge_with(&overlay).db_path,
            PathBuf::from("/data/other.db")
        );
    }

    #[test]
    fn given_cli_override_when_applied_then_replaces_db_path() {
        let settings = Settings::default().with_db_path(Some(PathBuf::from("/tmp/cli.db")));
        assert_eq!(settings.db_path, PathBuf::from("/tmp/cli.db"));

        let unchanged = settings.clone().with_db_path(None);
        assert_eq!(unchanged, settings);
    }

    #[test]
    fn given_settings_when_serializing_then_toml_and_template_parse() {
        let settings = Settings {
            db_path: PathBuf::from("/data/clients.db"),
        };
        let toml = settings.to_toml().unwrap();
        assert!(toml.contains("db_path = \"/data/clients.db\""));
        let parsed: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(parsed.db_path.is_none());
    }
}
