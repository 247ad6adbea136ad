//! Configuration service implementation.
//!
//! Loads `PolychatConfig` from `~/.config/polychat/config.toml` (or a custom
//! path) and caches it. A missing file yields the defaults.

use crate::paths::PolychatPaths;
use polychat_core::PolychatError;
use polychat_core::config::PolychatConfig;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<PolychatConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config path.
    pub fn new() -> Result<Self, PolychatError> {
        let path = PolychatPaths::config_file().map_err(|e| PolychatError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service for a custom config path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it from file if not cached.
    pub fn get_config(&self) -> Result<PolychatConfig, PolychatError> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| PolychatError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| PolychatError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Writes `config` to the config path, creating parent directories.
    pub fn save(&self, config: &PolychatConfig) -> Result<(), PolychatError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| path_error(parent, e))?;
        }
        std::fs::write(&self.path, config.to_toml_string()?)
            .map_err(|e| path_error(&self.path, e))?;
        self.invalidate_cache();
        Ok(())
    }

    fn load(&self) -> Result<PolychatConfig, PolychatError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No config file, using defaults");
            return Ok(PolychatConfig::default());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| path_error(&self.path, e))?;
        let config = PolychatConfig::from_toml_str(&content)?;
        tracing::debug!(path = %self.path.display(), "Loaded config");
        Ok(config)
    }
}

fn path_error(path: &Path, err: std::io::Error) -> PolychatError {
    PolychatError::io(format!("{}: {err}", path.display()))
}
