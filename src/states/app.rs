//! Application Config
//!
//! Persisted settings: API endpoint, paging, cache sizes, log level.

use crate::constants::{
    CACHE_BLOCK_SIZE, DEFAULT_ENDPOINT, MAX_BLOCKS_IN_CACHE, PAGE_SIZE, REQUEST_TIMEOUT_SECS,
    SEARCH_DEBOUNCE_MS,
};
use crate::error::Result;
use crate::helpers::{get_or_create_config_dir, read_optional};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

const CONFIG_FILE: &str = "rm-dashboard.toml";

/// Persisted application config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    pub cache_block_size: usize,
    pub max_blocks_in_cache: usize,
    /// `EnvFilter` directive, e.g. `info` or `rm_dashboard=debug`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: PAGE_SIZE,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            cache_block_size: CACHE_BLOCK_SIZE,
            max_blocks_in_cache: MAX_BLOCKS_IN_CACHE,
            log_level: "info".to_string(),
        }
    }
}

/// Path of the config file in the platform config directory
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE))
}

impl AppConfig {
    /// Load config from `path`; a missing or empty file yields defaults
    pub fn try_load(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading config file");
        let value = read_optional(path)?;

        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&value).inspect_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
        })?;
        Ok(config)
    }

    /// Load config from the platform config directory
    pub fn load_default() -> Result<Self> {
        Self::try_load(&get_config_path()?)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let value = toml::to_string(self)?;
        std::fs::write(path, value)?;
        info!(path = ?path, "Config saved");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
