//! Client configuration.
//!
//! Loads `config.toml` from the config directory, creating it with defaults
//! on first use, and caches the result.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use creator_core::error::{CreatorError, Result};

use crate::paths::CreatorPaths;
use crate::storage::AtomicTomlFile;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const BACKEND_URL_ENV_VAR: &str = "CREATOR_BACKEND_URL";
pub const REQUEST_TIMEOUT_ENV_VAR: &str = "CREATOR_REQUEST_TIMEOUT_SECS";

/// Settings for talking to the Creator OS backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL without the `/api` suffix.
    pub backend_url: String,
    /// Upper bound for every backend request.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies environment-style overrides read through `lookup`.
    ///
    /// Unparseable timeout values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("[Config] backend_url overridden by {}", BACKEND_URL_ENV_VAR);
            self.backend_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => tracing::warn!(
                    "[Config] Ignoring {}={:?}: not a whole number of seconds",
                    REQUEST_TIMEOUT_ENV_VAR,
                    raw
                ),
            }
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.backend_url).map_err(|e| {
            CreatorError::config(format!("Invalid backend_url '{}': {}", self.backend_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CreatorError::config(format!(
                "backend_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CreatorError::config(
                "request_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Loads and caches [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<ClientConfig>>,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_paths(paths: &CreatorPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    /// Returns the file-backed configuration, loading it on first access.
    ///
    /// A missing file is created with defaults. Environment overrides are not
    /// applied here; see [`ConfigService::effective_config`].
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self
                .config
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self
                .config
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// File configuration with process environment overrides applied, then
    /// validated.
    pub fn effective_config(&self) -> Result<ClientConfig> {
        let mut config = self.get_config()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        config.validate()?;
        self.file.save(config)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<ClientConfig> {
        match self.file.load()? {
            Some(config) => Ok(config),
            None => {
                let default_config = ClientConfig::default();
                self.file.save(&default_config)?;
                tracing::info!(
                    "[Config] Wrote default configuration to {}",
                    self.file.path().display()
                );
                Ok(default_config)
            }
        }
    }
}
