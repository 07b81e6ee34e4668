// SPDX-License-Identifier: MPL-2.0
//! This module handles the user preferences that steer localization,
//! loaded from and saved to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use json_toolkit_i18n::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("en".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::{DEFAULT_LOCALE, FALLBACK_LOCALE};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Preferred locale, e.g. `"en"`.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub fallback_language: Option<String>,
    /// Directory of `<locale>.ftl` files replacing the embedded catalog.
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub detect_system_locale: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            fallback_language: Some(FALLBACK_LOCALE.to_string()),
            catalog_dir: None,
            detect_system_locale: Some(defaults::DEFAULT_DETECT_SYSTEM_LOCALE),
        }
    }
}

/// Path of `settings.toml` inside the resolved config directory.
pub fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|dir| config_path_in(&dir))
}

/// Path of `settings.toml` inside `dir`.
pub fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads `path`. A file that is not valid TOML yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    match try_load_from_path(path) {
        Err(Error::Config(error)) => {
            tracing::warn!(path = %path.display(), %error, "ignoring invalid settings file");
            Ok(Config::default())
        }
        other => other,
    }
}

/// Reads `path`, failing with [`Error::Config`] when it is not valid TOML.
pub fn try_load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
