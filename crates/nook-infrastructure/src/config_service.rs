//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `~/.config/nook/config.toml` (or an explicit
//! path) and applies environment overrides.

use crate::paths::NookPaths;
use nook_core::NookError;
use nook_core::config::ClientConfig;
use nook_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "NOOK_BASE_URL";

/// Configuration service bound to one config file path.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default config file location.
    pub fn new_default() -> Result<Self> {
        let path = NookPaths::config_file().map_err(|e| NookError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a service for an explicit config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// A missing file yields the defaults. `NOOK_BASE_URL` overrides the
    /// file's `base_url`. The result is validated before it is returned.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        let config = apply_env_overrides(config, |key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads the file without environment overrides.
    pub fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", self.path);
        Ok(config)
    }

    /// Writes a config file with every default spelled out, unless one exists.
    ///
    /// Returns `true` if a file was created.
    pub fn ensure_config_file(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&ClientConfig::default())?;
        fs::write(&self.path, content)?;
        tracing::info!("Created config file at {:?}", self.path);
        Ok(true)
    }
}

/// Applies environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url.trim().to_string();
    }
    config
}
