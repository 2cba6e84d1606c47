//! Integration tests for Settings config loading.
//!
//! These tests only use explicit config files in temp directories, so the
//! user's global config never takes part. Every test holds `ENV_LOCK`
//! because `Settings::load` reads the process environment.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use clientreg::application::ApplicationError;
use clientreg::config::Settings;

const DB_PATH_VAR: &str = "CLIENTREG_DB_PATH";

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes access to the environment; `CLIENTREG_DB_PATH` is unset while held.
struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn acquire() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::remove_var(DB_PATH_VAR);
        Self { _lock: lock }
    }

    fn set_db_path(&self, value: &str) {
        env::set_var(DB_PATH_VAR, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(DB_PATH_VAR);
    }
}

#[test]
fn given_config_file_with_db_path_when_load_then_uses_it() {
    // Arrange
    let _env = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "db_path = \"/srv/clientreg/clients.db\"\n").unwrap();

    // Act
    let settings = Settings::load(Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(settings.db_path, PathBuf::from("/srv/clientreg/clients.db"));
}

#[test]
fn given_config_file_with_tilde_when_load_then_expands_home() {
    let _env = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "db_path = \"~/data/clients.db\"\n").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(
        settings.db_path,
        PathBuf::from(home).join("data").join("clients.db")
    );
}

#[test]
fn given_empty_config_file_when_load_then_keeps_default_db_path() {
    let _env = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    assert_eq!(settings.db_path, Settings::default().db_path);
}

#[test]
fn given_missing_config_file_when_load_then_fails_with_config_error() {
    let _env = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();

    let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn given_malformed_config_file_when_load_then_fails_with_config_error() {
    let _env = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "db_path = [not toml").unwrap();

    let err = Settings::load(Some(&config_path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("parse"));
}

#[test]
fn given_loaded_settings_when_cli_db_given_then_cli_wins() {
    let _env = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "db_path = \"/from/file.db\"\n").unwrap();

    let settings = Settings::load(Some(&config_path))
        .unwrap()
        .with_db_path(Some(PathBuf::from("/from/cli.db")));

    assert_eq!(settings.db_path, PathBuf::from("/from/cli.db"));
}

#[test]
fn given_db_path_env_var_when_load_then_overrides_config_file() {
    // Arrange
    let env_guard = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "db_path = \"/from/file.db\"\n").unwrap();
    env_guard.set_db_path("/from/env.db");

    // Act
    let settings = Settings::load(Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(settings.db_path, PathBuf::from("/from/env.db"));
}

#[test]
fn given_db_path_env_var_and_cli_db_when_load_then_cli_wins() {
    let env_guard = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "db_path = \"/from/file.db\"\n").unwrap();
    env_guard.set_db_path("/from/env.db");

    let settings = Settings::load(Some(&config_path))
        .unwrap()
        .with_db_path(Some(PathBuf::from("/from/cli.db")));

    assert_eq!(settings.db_path, PathBuf::from("/from/cli.db"));
}

#[test]
fn given_db_path_env_var_with_tilde_when_load_then_expands_home() {
    let env_guard = EnvGuard::acquire();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("clientreg.toml");
    fs::write(&config_path, "").unwrap();
    env_guard.set_db_path("~/env/clients.db");

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    let home = env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.db_path, PathBuf::from(home).join("env").join("clients.db"));
}
