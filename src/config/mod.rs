// SPDX-License-Identifier: MPL-2.0
//! This module handles the view's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[gallery]` - Initial thumbnail size, sort and filter
//! - `[metadata]` - Metadata request timeout and endpoint path
//! - `[host]` - Host base URL and its input/output/temp directories
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line (see [`crate::app::paths`])
//! 3. Set `IMAGE_SEARCH_VIEW_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use image_search_view::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::bridge::output::HostFolders;
use crate::error::{Error, Result};
use crate::gallery::{FilterMode, SortMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Initial gallery state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    #[serde(default = "default_thumb_size", skip_serializing_if = "Option::is_none")]
    pub thumb_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterMode>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            thumb_size: default_thumb_size(),
            sort: Some(SortMode::default()),
            filter: Some(FilterMode::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataConfig {
    /// Seconds before an unanswered metadata request resolves empty.
    #[serde(
        default = "default_metadata_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_secs: Option<u64>,

    /// Path of the host's metadata endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_metadata_timeout_secs(),
            endpoint: Some(DEFAULT_METADATA_ENDPOINT.to_string()),
        }
    }
}

/// Where the hosting application lives.
///
/// The directories are only needed when resolving an emitted selection back
/// to files on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_HOST_BASE_URL.to_string()),
            input_dir: None,
            output_dir: None,
            temp_dir: None,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub host: HostConfig,
}

impl Config {
    /// Metadata timeout, clamped to the supported range.
    pub fn metadata_timeout(&self) -> Duration {
        let secs = self
            .metadata
            .timeout_secs
            .unwrap_or(DEFAULT_METADATA_TIMEOUT_SECS)
            .clamp(MIN_METADATA_TIMEOUT_SECS, MAX_METADATA_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn host_base_url(&self) -> &str {
        self.host.base_url.as_deref().unwrap_or(DEFAULT_HOST_BASE_URL)
    }

    pub fn metadata_endpoint(&self) -> &str {
        self.metadata
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_METADATA_ENDPOINT)
    }

    /// The host's image folders. Unset folders use the host's default names.
    pub fn host_folders(&self) -> HostFolders {
        let dir = |value: &Option<PathBuf>, default: &str| {
            value.clone().unwrap_or_else(|| PathBuf::from(default))
        };
        HostFolders {
            input: dir(&self.host.input_dir, DEFAULT_INPUT_DIR),
            output: dir(&self.host.output_dir, DEFAULT_OUTPUT_DIR),
            temp: dir(&self.host.temp_dir, DEFAULT_TEMP_DIR),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_thumb_size() -> Option<u32> {
    Some(DEFAULT_THUMB_SIZE)
}

fn default_metadata_timeout_secs() -> Option<u64> {
    Some(DEFAULT_METADATA_TIMEOUT_SECS)
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some("notice-config-load-error".to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_config_path_with_override(None) {
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
