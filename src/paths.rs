// SPDX-License-Identifier: MPL-2.0
//! Where `notifications.toml` lives.
//!
//! Lookup order: explicit override, `--config-dir`, `$TOAST_RELAY_CONFIG_DIR`,
//! then the platform config directory joined with `ToastRelay`.

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "ToastRelay";

pub const ENV_CONFIG_DIR: &str = "TOAST_RELAY_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records `--config-dir` once at startup. Later calls return `false`.
pub fn init_cli_override(config_dir: Option<String>) -> bool {
    CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok()
}

#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Resolves the config directory, preferring `override_path` when given.
/// An empty environment variable counts as unset.
#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(|| CLI_CONFIG_DIR.get().cloned().flatten())
        .or_else(|| {
            std::env::var_os(ENV_CONFIG_DIR)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_NAME)))
}
