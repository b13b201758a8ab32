//! Unified path management for local client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/creator-os/        # Config directory (or $CREATOR_HOME)
//! ├── config.toml              # Client configuration (backend URL, timeout)
//! └── session.toml             # The single active session (user_id, user_name)
//! ```

use std::path::PathBuf;
use thiserror::Error;

use creator_core::CreatorError;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "creator-os";

/// Environment variable that relocates every local file.
pub const HOME_ENV_VAR: &str = "CREATOR_HOME";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

impl From<PathError> for CreatorError {
    fn from(err: PathError) -> Self {
        CreatorError::config(err.to_string())
    }
}

/// Resolves where the client keeps its files.
#[derive(Debug, Clone, Default)]
pub struct CreatorPaths {
    base_override: Option<PathBuf>,
}

impl CreatorPaths {
    /// Creates a resolver. `base` replaces the platform config directory.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self {
            base_override: base,
        }
    }

    /// Uses `$CREATOR_HOME` when set, otherwise the platform default.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var_os(HOME_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        )
    }

    /// Returns the configuration directory (e.g., `~/.config/creator-os/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.toml"))
    }
}
