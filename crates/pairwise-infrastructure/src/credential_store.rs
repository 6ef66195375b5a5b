//! Credential storage implementations.
//!
//! `FileCredentialStore` persists the access token in `credentials.json`;
//! `InMemoryCredentialStore` keeps it for the lifetime of the process only.

use crate::paths::PairwisePaths;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use pairwise_core::credential::CredentialProvider;
use pairwise_core::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// On-disk shape of `credentials.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    saved_at: Option<String>,
}

/// File-backed credential provider.
///
/// The file is read on the first `get()` and cached afterwards; `set()` and
/// `clear()` write through.
#[derive(Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    /// `None` until the file has been read once.
    cached: Arc<RwLock<Option<StoredCredential>>>,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Store at the default location under the config directory.
    pub fn from_paths(paths: &PairwisePaths) -> Result<Self> {
        Ok(Self::new(paths.credentials_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoredCredential {
        {
            let read_lock = self.cached.read().await;
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    "[FileCredentialStore] Ignoring unreadable credentials file {}: {}",
                    self.path.display(),
                    e
                );
                StoredCredential::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredCredential::default(),
            Err(e) => {
                tracing::warn!(
                    "[FileCredentialStore] Failed to read {}: {}",
                    self.path.display(),
                    e
                );
                StoredCredential::default()
            }
        };

        let mut write_lock = self.cached.write().await;
        *write_lock = Some(loaded.clone());
        loaded
    }

    async fn persist(&self, stored: StoredCredential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&stored)?;
        tokio::fs::write(&self.path, json).await?;

        // Set file permissions to 600 (user read/write only) on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, permissions).await?;
        }

        *self.cached.write().await = Some(stored);
        Ok(())
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialStore {
    async fn get(&self) -> Option<String> {
        self.load()
            .await
            .access_token
            .filter(|token| !token.trim().is_empty())
    }

    async fn set(&self, token: String) -> Result<()> {
        self.persist(StoredCredential {
            access_token: Some(token),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        })
        .await?;
        tracing::info!(
            "[FileCredentialStore] Stored access token in {}",
            self.path.display()
        );
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.persist(StoredCredential::default()).await?;
        tracing::info!("[FileCredentialStore] Cleared access token");
        Ok(())
    }
}

static DEFAULT_STORE: OnceCell<Arc<FileCredentialStore>> = OnceCell::new();

/// Process-wide store at the default location, created on first use.
pub fn default_credential_store() -> Result<Arc<FileCredentialStore>> {
    DEFAULT_STORE
        .get_or_try_init(|| {
            FileCredentialStore::from_paths(&PairwisePaths::default()).map(Arc::new)
        })
        .cloned()
}

/// Credential provider that never touches the filesystem.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialProvider for InMemoryCredentialStore {
    async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn set(&self, token: String) -> Result<()> {
        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_has_no_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("credentials.json"));
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_set_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("credentials.json");

        let store = FileCredentialStore::new(&path);
        store.set("tok-123".to_string()).await.unwrap();
        assert_eq!(store.get().await.as_deref(), Some("tok-123"));

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get().await.as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_clear_removes_token() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        let store = FileCredentialStore::new(&path);

        store.set("tok-123".to_string()).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.get().await, None);
        assert_eq!(FileCredentialStore::new(&path).get().await, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_treated_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.get().await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_mode_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        FileCredentialStore::new(&path)
            .set("tok".to_string())
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.get().await, None);
        store.set("abc".to_string()).await.unwrap();
        assert_eq!(store.get().await.as_deref(), Some("abc"));
        store.clear().await.unwrap();
        assert_eq!(store.get().await, None);
    }
}
