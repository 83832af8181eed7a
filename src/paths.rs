// SPDX-License-Identifier: MPL-2.0
//! Directory resolution for settings and persisted locale state.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`LOCALE_STORE_DATA_DIR`, `LOCALE_STORE_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "LocaleStore";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "LOCALE_STORE_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LOCALE_STORE_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` values given on the command line.
///
/// Must be called at most once, before any path is resolved.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) -> Result<()> {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .map_err(|_| Error::Config("CLI data dir override already initialized".to_string()))?;
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .map_err(|_| Error::Config("CLI config dir override already initialized".to_string()))?;
    Ok(())
}

/// Returns the directory holding persisted state (`storage.toml`).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the directory holding user preferences (`settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
