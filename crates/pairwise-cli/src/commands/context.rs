use anyhow::{Context, Result};
use pairwise_core::config::ClientConfig;
use pairwise_core::credential::CredentialProvider;
use pairwise_infrastructure::{
    ConfigService, FileCredentialStore, PairwisePaths, default_credential_store,
};
use pairwise_interaction::HttpScoringClient;
use std::path::Path;
use std::sync::Arc;

/// Services shared by every subcommand.
pub struct CliContext {
    pub config_service: ConfigService,
    pub config: ClientConfig,
    pub credentials: Arc<FileCredentialStore>,
}

impl CliContext {
    /// Loads configuration and opens the credential store, from `config_dir`
    /// when given and from the user's config directory otherwise.
    pub fn new(config_dir: Option<&Path>) -> Result<Self> {
        let paths = PairwisePaths::new(config_dir);
        let credentials = match config_dir {
            Some(_) => Arc::new(FileCredentialStore::from_paths(&paths)?),
            None => default_credential_store()?,
        };
        let config_service = ConfigService::new(paths);
        let config = config_service
            .get_config()
            .context("Failed to load configuration")?;
        tracing::debug!("[CliContext] API at {}", config.api_url);

        Ok(Self {
            config_service,
            config,
            credentials,
        })
    }

    pub fn client(&self) -> Result<Arc<HttpScoringClient>> {
        let credentials: Arc<dyn CredentialProvider> = self.credentials.clone();
        let client = HttpScoringClient::new(&self.config, credentials)
            .context("Failed to create API client")?;
        Ok(Arc::new(client))
    }
}
