//! Configuration data model.
//!
//! `FileConfig` mirrors `pantry.toml` as written; `Config` is the resolved
//! runtime form with palettes parsed and API keys looked up.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::defaults::{
    default_playlist, DEFAULT_FOOD_BASE_URL, DEFAULT_ROTATION_SECS, DEFAULT_SUGGEST_API_KEY_ENV,
    DEFAULT_SUGGEST_BASE_URL, DEFAULT_SUGGEST_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::host::Appearance;
use crate::ui::theme::PaletteSet;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub media: MediaConfig,
    pub food: FoodConfig,
    pub suggest: SuggestConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
}

/// Resolved theme settings.
#[derive(Debug, Clone, Default)]
pub struct ThemeConfig {
    /// Appearance the CLI host reports at startup.
    pub appearance: Appearance,
    pub palettes: PaletteSet,
}

/// Background media rotation settings under `[media]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub playlist: Vec<String>,
    pub rotation_secs: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            playlist: default_playlist(),
            rotation_secs: DEFAULT_ROTATION_SECS,
        }
    }
}

impl MediaConfig {
    pub fn rotation_period(&self) -> Duration {
        Duration::from_secs(self.rotation_secs)
    }
}

/// Food image lookup settings under `[food]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub base_url: String,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FOOD_BASE_URL.to_string(),
        }
    }
}

/// Resolved dish-suggestion API settings.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    pub base_url: String,
    pub model: String,
    /// Empty when no key was configured; requests are then sent unauthenticated.
    pub api_key: String,
    pub temperature: Option<f64>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SUGGEST_BASE_URL.to_string(),
            model: DEFAULT_SUGGEST_MODEL.to_string(),
            api_key: String::new(),
            temperature: None,
        }
    }
}

/// Network/HTTP timeout policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) theme: ThemeFileConfig,
    pub(super) media: MediaConfig,
    pub(super) food: FoodConfig,
    pub(super) suggest: SuggestFileConfig,
    pub(super) network: NetworkConfig,
    pub(super) display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(super) struct ThemeFileConfig {
    pub(super) appearance: String,
    pub(super) light: BTreeMap<String, String>,
    pub(super) dark: BTreeMap<String, String>,
}

impl Default for ThemeFileConfig {
    fn default() -> Self {
        Self {
            appearance: "system".to_string(),
            light: BTreeMap::new(),
            dark: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(super) struct SuggestFileConfig {
    pub(super) base_url: String,
    pub(super) model: String,
    pub(super) api_key: String,
    pub(super) api_key_env: Option<String>,
    pub(super) temperature: Option<f64>,
}

impl Default for SuggestFileConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SUGGEST_BASE_URL.to_string(),
            model: DEFAULT_SUGGEST_MODEL.to_string(),
            api_key: String::new(),
            api_key_env: Some(DEFAULT_SUGGEST_API_KEY_ENV.to_string()),
            temperature: None,
        }
    }
}

/// Result of explicit global config initialization (`pantry init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created {
        path: std::path::PathBuf,
    },
    AlreadyInitialized {
        path: std::path::PathBuf,
    },
    Overwritten {
        path: std::path::PathBuf,
        backup_path: std::path::PathBuf,
    },
}
