// SPDX-License-Identifier: MPL-2.0
//! Application configuration, loaded from and saved to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Default UI locale
//! - `[catalogs]` - Optional on-disk catalog directory
//! - `[logging]` - `tracing` filter directive
//!
//! # Examples
//!
//! ```no_run
//! use locale_store::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.default_locale = Some("fi".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// Locale used when no language has been persisted yet (e.g. "en", "fi").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

/// Where message catalogs come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogConfig {
    /// Root directory with `<locale>/messages.ftl` files. Embedded catalogs are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "locale_store=debug".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub catalogs: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Default locale, falling back to [`DEFAULT_LOCALE`].
    pub fn default_locale(&self) -> &str {
        self.general
            .default_locale
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
    }

    pub fn log_filter(&self) -> &str {
        self.logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Failed to load config");
                    (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    )
                }
            };
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
