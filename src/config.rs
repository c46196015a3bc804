// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::pipeline::{DEFAULT_MIN_UNDERVALUE_PCT, SortKey};
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_min_undervalue_pct() -> f64 {
    DEFAULT_MIN_UNDERVALUE_PCT
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Base URL of the listing backend (the service behind /api/fetch and
    /// /api/search-rightmove).
    pub backend_url: String,
    #[serde(default)]
    pub allow_insecure_certs: bool,

    #[serde(default = "default_min_undervalue_pct")]
    pub min_undervalue_pct: f64,
    #[serde(default)]
    pub require_area: bool,
    #[serde(default)]
    pub default_sort: SortKey,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            allow_insecure_certs: false,
            // Match the serde defaults
            min_undervalue_pct: DEFAULT_MIN_UNDERVALUE_PCT,
            require_area: false,
            default_sort: SortKey::default(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers (onboarding) can behave accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Helper to detect whether an anyhow::Error indicates that the
    /// config file was missing, as opposed to unreadable or malformed.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
