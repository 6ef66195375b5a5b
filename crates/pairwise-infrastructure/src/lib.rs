//! Infrastructure layer for Pairwise: configuration files, credential
//! storage and navigation history.

pub mod config_service;
pub mod credential_store;
pub mod navigation_history;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::credential_store::{
    FileCredentialStore, InMemoryCredentialStore, default_credential_store,
};
pub use crate::navigation_history::InMemoryHistory;
pub use crate::paths::PairwisePaths;
