// SPDX-License-Identifier: MPL-2.0
//! Resolution of the directory holding `settings.toml`.
//!
//! # Resolution Order
//!
//! 1. **Environment variable** `JSON_TOOLKIT_CONFIG_DIR`, when set and non-empty
//! 2. **Platform default** - via the `dirs` crate, with the application name appended
//!
//! The `--config <file>` CLI flag names the settings file itself and bypasses
//! this lookup entirely.

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "JsonToolkit";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "JSON_TOOLKIT_CONFIG_DIR";

/// Returns the application config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/JsonToolkit/`
/// - macOS: `~/Library/Application Support/JsonToolkit/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\JsonToolkit\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
