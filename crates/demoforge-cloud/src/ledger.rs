//! Resource ledger persistence
//!
//! Manages the `.demoforge/resources.json` file which records every cloud
//! resource a `setup` run created, so a later `reset` can reverse exactly
//! those changes. The file exists if and only if at least one recorded
//! resource has not yet been confirmed deleted.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

const LEDGER_DIR: &str = ".demoforge";
const LEDGER_FILE: &str = "resources.json";
const LEDGER_TMP: &str = "resources.json.tmp";

/// Record of the resources created by a provisioning run
///
/// This is the single source of truth for teardown. No component may
/// infer resource existence by listing the cloud account instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    /// Bucket names in creation order, not yet confirmed deleted
    #[serde(default)]
    pub buckets: Vec<String>,

    /// Name of the deployed Cloud Run service, if the deploy succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_run_service: Option<String>,

    /// Externally reachable endpoint of the deployed service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_run_url: Option<String>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no resource is recorded ("nothing to tear down")
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.cloud_run_service.is_none()
    }

    pub fn record_bucket(&mut self, name: impl Into<String>) {
        self.buckets.push(name.into());
    }

    pub fn record_service(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.cloud_run_service = Some(name.into());
        self.cloud_run_url = Some(url.into());
    }
}

/// Storage behind the ledger
///
/// Injected into the lifecycle so the file-backed store can be swapped for
/// an in-memory one in tests.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns the current ledger, or an empty one when none is persisted.
    /// Absence is a valid state, never an error.
    async fn load(&self) -> Result<ResourceLedger>;

    /// Persists the ledger so that a reader never observes a half-written
    /// record.
    async fn save(&self, ledger: &ResourceLedger) -> Result<()>;

    /// Removes the persisted ledger. A no-op when nothing is persisted.
    async fn clear(&self) -> Result<()>;
}

/// File-backed ledger store rooted at the working directory
pub struct FileLedgerStore {
    root: PathBuf,
}

impl FileLedgerStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn ledger_dir(&self) -> PathBuf {
        self.root.join(LEDGER_DIR)
    }

    /// Path of the persisted ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_dir().join(LEDGER_FILE)
    }

    fn tmp_path(&self) -> PathBuf {
        self.ledger_dir().join(LEDGER_TMP)
    }

    async fn ensure_ledger_dir(&self) -> Result<()> {
        let dir = self.ledger_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            tracing::debug!("Created ledger directory: {}", dir.display());
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for FileLedgerStore {
    async fn load(&self) -> Result<ResourceLedger> {
        let path = self.ledger_path();
        if !path.exists() {
            tracing::debug!("Ledger file not found, returning empty ledger");
            return Ok(ResourceLedger::new());
        }

        let content = fs::read_to_string(&path).await?;
        let ledger: ResourceLedger = serde_json::from_str(&content).map_err(|e| {
            crate::error::CloudError::LedgerError(format!(
                "unreadable ledger {}: {e}",
                path.display()
            ))
        })?;

        tracing::debug!("Loaded ledger with {} buckets", ledger.buckets.len());
        Ok(ledger)
    }

    async fn save(&self, ledger: &ResourceLedger) -> Result<()> {
        self.ensure_ledger_dir().await?;

        // Write to a temp file first, then rename over the target, so a
        // crash mid-write can never leave a truncated ledger behind.
        let tmp = self.tmp_path();
        let content = serde_json::to_string_pretty(ledger)?;
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, self.ledger_path()).await?;

        tracing::debug!("Saved ledger with {} buckets", ledger.buckets.len());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.ledger_path();
        if path.exists() {
            fs::remove_file(&path).await?;
            tracing::debug!("Removed ledger file");
        }
        Ok(())
    }
}

/// In-memory ledger store
///
/// Drop-in replacement for [`FileLedgerStore`] in tests. Keeps every saved
/// revision so assertions can inspect what was persisted when.
#[derive(Default)]
pub struct MemoryLedgerStore {
    current: Mutex<Option<ResourceLedger>>,
    revisions: Mutex<Vec<ResourceLedger>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing ledger
    pub fn with_ledger(ledger: ResourceLedger) -> Self {
        Self {
            current: Mutex::new(Some(ledger)),
            revisions: Mutex::new(Vec::new()),
        }
    }

    /// Every ledger passed to `save`, oldest first
    pub fn revisions(&self) -> Vec<ResourceLedger> {
        self.revisions.lock().unwrap().clone()
    }

    /// True when a ledger is currently persisted
    pub fn is_persisted(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load(&self) -> Result<ResourceLedger> {
        Ok(self.current.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, ledger: &ResourceLedger) -> Result<()> {
        *self.current.lock().unwrap() = Some(ledger.clone());
        self.revisions.lock().unwrap().push(ledger.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.current.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let store = FileLedgerStore::new(temp_dir.path());

        let mut ledger = ResourceLedger::new();
        ledger.record_bucket("automation-bucket-ab12cd34");
        ledger.record_service("svc1", "https://svc1-xxxx.run.app");

        store.save(&ledger).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, ledger);
    }

    #[tokio::test]
    async fn test_roundtrip_without_service_fields() {
        let temp_dir = tempdir().unwrap();
        let store = FileLedgerStore::new(temp_dir.path());

        let mut ledger = ResourceLedger::new();
        ledger.record_bucket("automation-bucket-00000001");

        store.save(&ledger).await.unwrap();

        // Absent optionals stay absent, in the record and in the file.
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, ledger);
        assert!(loaded.cloud_run_service.is_none());
        assert!(loaded.cloud_run_url.is_none());

        let raw = std::fs::read_to_string(store.ledger_path()).unwrap();
        assert!(!raw.contains("cloud_run_service"));
    }

    #[tokio::test]
    async fn test_file_schema() {
        let temp_dir = tempdir().unwrap();
        let store = FileLedgerStore::new(temp_dir.path());

        let mut ledger = ResourceLedger::new();
        ledger.record_bucket("automation-bucket-ab12cd34");
        ledger.record_service("svc1", "https://svc1-xxxx.run.app");
        store.save(&ledger).await.unwrap();

        let raw = std::fs::read_to_string(store.ledger_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value["buckets"],
            serde_json::json!(["automation-bucket-ab12cd34"])
        );
        assert_eq!(value["cloud_run_service"], "svc1");
        assert_eq!(value["cloud_run_url"], "https://svc1-xxxx.run.app");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = FileLedgerStore::new(temp_dir.path());

        let ledger = store.load().await.unwrap();
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let store = FileLedgerStore::new(temp_dir.path());

        // Clearing with no file present is not an error.
        store.clear().await.unwrap();

        let mut ledger = ResourceLedger::new();
        ledger.record_bucket("automation-bucket-ab12cd34");
        store.save(&ledger).await.unwrap();
        assert!(store.ledger_path().exists());

        store.clear().await.unwrap();
        assert!(!store.ledger_path().exists());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let temp_dir = tempdir().unwrap();
        let store = FileLedgerStore::new(temp_dir.path());

        store.save(&ResourceLedger::new()).await.unwrap();
        assert!(store.ledger_path().exists());
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_memory_store_revisions() {
        let store = MemoryLedgerStore::new();

        let mut ledger = ResourceLedger::new();
        ledger.record_bucket("automation-bucket-ab12cd34");
        store.save(&ledger).await.unwrap();

        ledger.record_service("svc1", "https://svc1-xxxx.run.app");
        store.save(&ledger).await.unwrap();

        let revisions = store.revisions();
        assert_eq!(revisions.len(), 2);
        assert!(revisions[0].cloud_run_service.is_none());
        assert_eq!(revisions[1].cloud_run_service.as_deref(), Some("svc1"));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
