// SPDX-License-Identifier: MPL-2.0
//! Notification timing and labelling preferences, stored in `notifications.toml`.
//!
//! # Configuration Sections
//!
//! - `[durations]` - Per-kind auto-close durations and the removal delay (milliseconds)
//! - `[confirm]` - Default title and button labels for confirmation requests
//!
//! Every field is optional in the file; missing values fall back to the
//! constants in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use toast_relay::config::{self, Config};
//!
//! let (mut config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//!
//! config.durations.error_ms = 10_000;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notifications::Kind;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "notifications.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Display durations, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationsConfig {
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,

    #[serde(default = "default_info_ms")]
    pub info_ms: u64,

    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,

    #[serde(default = "default_error_ms")]
    pub error_ms: u64,

    /// Grace period between CLOSING and eviction. Applies to every kind.
    #[serde(default = "default_removal_delay_ms")]
    pub removal_delay_ms: u64,
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            success_ms: DEFAULT_SUCCESS_MS,
            info_ms: DEFAULT_INFO_MS,
            warning_ms: DEFAULT_WARNING_MS,
            error_ms: DEFAULT_ERROR_MS,
            removal_delay_ms: DEFAULT_REMOVAL_DELAY_MS,
        }
    }
}

/// Default texts for confirmation requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmConfig {
    #[serde(default = "default_confirm_title")]
    pub title: String,

    #[serde(default = "default_confirm_text")]
    pub confirm_text: String,

    #[serde(default = "default_cancel_text")]
    pub cancel_text: String,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            title: default_confirm_title(),
            confirm_text: default_confirm_text(),
            cancel_text: default_cancel_text(),
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,

    #[serde(default)]
    pub confirm: ConfirmConfig,
}

impl Config {
    /// Returns the default auto-close duration for `kind`.
    ///
    /// Confirmation requests never auto-close and yield `None`.
    #[must_use]
    pub fn auto_close_for(&self, kind: Kind) -> Option<Duration> {
        let ms = match kind {
            Kind::Success => self.durations.success_ms,
            Kind::Info => self.durations.info_ms,
            Kind::Warning => self.durations.warning_ms,
            Kind::Error => self.durations.error_ms,
            Kind::Confirm => return None,
        };
        Some(Duration::from_millis(ms))
    }

    /// Returns the delay between CLOSING and REMOVED.
    #[must_use]
    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.durations.removal_delay_ms)
    }

    /// Checks every duration against its accepted range.
    pub fn validate(&self) -> Result<()> {
        let d = &self.durations;
        for (field, value) in [
            ("success_ms", d.success_ms),
            ("info_ms", d.info_ms),
            ("warning_ms", d.warning_ms),
            ("error_ms", d.error_ms),
        ] {
            check_range(field, value, MIN_AUTO_CLOSE_MS, MAX_AUTO_CLOSE_MS)?;
        }
        check_range(
            "removal_delay_ms",
            d.removal_delay_ms,
            MIN_REMOVAL_DELAY_MS,
            MAX_REMOVAL_DELAY_MS,
        )
    }

    /// Returns a copy with zero durations replaced by their defaults and
    /// everything else clamped into range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = &self.durations;
        Self {
            durations: DurationsConfig {
                success_ms: sanitize(d.success_ms, DEFAULT_SUCCESS_MS, MAX_AUTO_CLOSE_MS),
                info_ms: sanitize(d.info_ms, DEFAULT_INFO_MS, MAX_AUTO_CLOSE_MS),
                warning_ms: sanitize(d.warning_ms, DEFAULT_WARNING_MS, MAX_AUTO_CLOSE_MS),
                error_ms: sanitize(d.error_ms, DEFAULT_ERROR_MS, MAX_AUTO_CLOSE_MS),
                removal_delay_ms: sanitize(
                    d.removal_delay_ms,
                    DEFAULT_REMOVAL_DELAY_MS,
                    MAX_REMOVAL_DELAY_MS,
                ),
            },
            confirm: self.confirm.clone(),
        }
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: format!("{value} ms is outside {min}..={max} ms"),
        })
    }
}

fn sanitize(value: u64, default: u64, max: u64) -> u64 {
    if value == 0 {
        default
    } else {
        value.min(max)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_success_ms() -> u64 {
    DEFAULT_SUCCESS_MS
}

fn default_info_ms() -> u64 {
    DEFAULT_INFO_MS
}

fn default_warning_ms() -> u64 {
    DEFAULT_WARNING_MS
}

fn default_error_ms() -> u64 {
    DEFAULT_ERROR_MS
}

fn default_removal_delay_ms() -> u64 {
    DEFAULT_REMOVAL_DELAY_MS
}

fn default_confirm_title() -> String {
    DEFAULT_CONFIRM_TITLE.to_string()
}

fn default_confirm_text() -> String {
    DEFAULT_CONFIRM_TEXT.to_string()
}

fn default_cancel_text() -> String {
    DEFAULT_CANCEL_TEXT.to_string()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, or the
/// file holds out-of-range values, a usable config is still returned along
/// with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => match config.validate() {
            Ok(()) => (config, None),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "sanitizing notification config");
                (config.sanitized(), Some(err.to_string()))
            }
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "falling back to default notification config");
            (Config::default(), Some(err.to_string()))
        }
    }
}

/// Loads configuration from a specific path without validating it.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
