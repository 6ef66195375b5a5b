//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/pairwise/config.toml` and
//! layers environment overrides on top.

use crate::paths::PairwisePaths;
use pairwise_core::config::ClientConfig;
use pairwise_core::{PairwiseError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the client configuration.
///
/// Priority: environment variables > config.toml > built-in defaults.
/// A missing file is not an error; a malformed one is.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: PairwisePaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: PairwisePaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self
            .load_from_file()?
            .with_env_overrides(|key| std::env::var(key).ok())?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes `config` to config.toml and refreshes the cache.
    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        config.validate()?;
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(config)?)?;
        tracing::info!("[ConfigService] Saved configuration to {}", path.display());
        self.invalidate_cache();
        Ok(())
    }

    fn config_path(&self) -> Result<PathBuf> {
        Ok(self.paths.config_file()?)
    }

    fn load_from_file(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| {
            PairwiseError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(PairwisePaths::default())
    }
}
