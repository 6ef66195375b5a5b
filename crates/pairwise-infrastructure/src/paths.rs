//! Path management for Pairwise configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pairwise/          # Config directory (XDG on Linux)
//! ├── config.toml              # Client configuration
//! └── credentials.json         # Access token (mode 600 on Unix)
//! ```

use pairwise_core::PairwiseError;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pairwise";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for PairwiseError {
    fn from(err: PathError) -> Self {
        PairwiseError::config(err.to_string())
    }
}

/// Resolves Pairwise's files, either under the platform config directory or
/// under an explicit base directory.
#[derive(Debug, Clone)]
pub struct PairwisePaths {
    base: Option<PathBuf>,
}

impl PairwisePaths {
    /// `None` uses the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the Pairwise configuration directory (e.g. `~/.config/pairwise/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the credentials file.
    ///
    /// # Security Note
    ///
    /// The file is written with mode 600 on Unix by `FileCredentialStore`.
    pub fn credentials_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("credentials.json"))
    }
}

impl Default for PairwisePaths {
    fn default() -> Self {
        Self::new(None)
    }
}
