//! File-backed key-value store for the user-supplied API key.
//!
//! The file is a flat JSON object; the key lives under `groq-api-key`.
//! Reads are served from memory, writes go through to disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::RwLock;
use tracing::info;

pub const API_KEY_NAME: &str = "groq-api-key";

#[derive(Clone)]
pub struct CredentialStore {
    path: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl CredentialStore {
    /// Loads the store from `path`. A missing file is an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Credential store {} is not valid JSON", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read credential store {}", path.display()))
            }
        };

        info!(
            "Credential store opened at {} ({} entries)",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    pub async fn api_key(&self) -> Option<String> {
        self.entries.read().await.get(API_KEY_NAME).cloned()
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            bail!("API key cannot be empty");
        }

        // The write lock is held across the disk write; memory only changes once it succeeds.
        let mut entries = self.entries.write().await;
        let mut updated = entries.clone();
        updated.insert(API_KEY_NAME.to_string(), api_key.to_string());
        self.persist(&updated).await?;
        *entries = updated;
        info!("API key saved");
        Ok(())
    }

    pub async fn clear_api_key(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(API_KEY_NAME) {
            return Ok(());
        }

        let mut updated = entries.clone();
        updated.remove(API_KEY_NAME);
        self.persist(&updated).await?;
        *entries = updated;
        info!("API key cleared");
        Ok(())
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("Failed to write credential store {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::open(dir.path().join("credentials.json"))
            .await
            .unwrap();
        assert!(store.api_key().await.is_none());
    }

    #[tokio::test]
    async fn test_set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = CredentialStore::open(&path).await.unwrap();
        store.set_api_key("  gsk_abc  ").await.unwrap();
        assert_eq!(store.api_key().await.as_deref(), Some("gsk_abc"));

        let reopened = CredentialStore::open(&path).await.unwrap();
        assert_eq!(reopened.api_key().await.as_deref(), Some("gsk_abc"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[API_KEY_NAME], "gsk_abc");
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::open(dir.path().join("c.json")).await.unwrap();
        assert!(store.set_api_key("   ").await.is_err());
        assert!(store.api_key().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_key_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");

        let store = CredentialStore::open(&path).await.unwrap();
        store.set_api_key("gsk_abc").await.unwrap();
        store.clear_api_key().await.unwrap();
        assert!(store.api_key().await.is_none());

        let reopened = CredentialStore::open(&path).await.unwrap();
        assert!(reopened.api_key().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_leaves_key_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("sub");
        let store = CredentialStore::open(blocked.join("c.json")).await.unwrap();

        // A regular file where the parent directory should be makes the write fail.
        std::fs::write(&blocked, "occupied").unwrap();

        assert!(store.set_api_key("gsk_x").await.is_err());
        assert!(store.api_key().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_key() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let store = CredentialStore::open(sub.join("c.json")).await.unwrap();
        store.set_api_key("gsk_abc").await.unwrap();

        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "occupied").unwrap();

        assert!(store.clear_api_key().await.is_err());
        assert_eq!(store.api_key().await.as_deref(), Some("gsk_abc"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(CredentialStore::open(&path).await.is_err());
    }
}
