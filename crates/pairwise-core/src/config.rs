use crate::error::{PairwiseError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.tournesol.app/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub const ENV_API_URL: &str = "PAIRWISE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PAIRWISE_TIMEOUT_SECS";

/// Client configuration, stored as `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Visibility given to a contributor rating the first time a video is selected.
    #[serde(default)]
    pub default_rating_public: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            default_rating_public: false,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Applies overrides from an environment lookup.
    ///
    /// Takes the lookup as a closure so tests do not have to touch the process
    /// environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                PairwiseError::config(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(PairwiseError::config("timeout_secs must be greater than zero"));
        }
        url::Url::parse(&self.api_url)?;
        Ok(())
    }
}
