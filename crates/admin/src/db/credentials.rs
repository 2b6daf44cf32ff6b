//! Credential registry backings.
//!
//! - [`JsonFileRegistry`] keeps the registry in one JSON file, rewriting the
//!   whole array on every insert.
//! - [`MemoryRegistry`] keeps it in process memory; used by tests and by
//!   callers that do not need persistence.

use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

use bharatcart_core::Handle;

use super::{CredentialRepository, RepositoryError};
use crate::models::CredentialRecord;

// =============================================================================
// File-backed registry
// =============================================================================

/// Registry persisted as a JSON array in a single file.
///
/// A missing or blank file reads as an empty registry. Writes go to a sibling
/// temp file that is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileRegistry {
    path: PathBuf,
    /// Held across every read-modify-write of the file in this process.
    write_lock: Mutex<()>,
}

impl JsonFileRegistry {
    /// Open a registry at `path`. The file is created on first insert.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<CredentialRecord>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid registry file {}: {e}",
                self.path.display()
            ))
        })
    }

    async fn write_records(&self, records: &[CredentialRecord]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl JsonFileRegistry {
    /// Caller must hold `write_lock`.
    async fn append(&self, record: CredentialRecord) -> Result<(), RepositoryError> {
        let mut records = self.read_records().await?;
        records.push(record);
        self.write_records(&records).await?;

        tracing::debug!(total = records.len(), "Registry persisted");
        Ok(())
    }
}

impl CredentialRepository for JsonFileRegistry {
    async fn list_all(&self) -> Result<Vec<CredentialRecord>, RepositoryError> {
        self.read_records().await
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let records = self.read_records().await?;
        Ok(records.into_iter().find(|record| &record.handle == handle))
    }

    #[instrument(skip(self, record), fields(path = %self.path.display(), handle = %record.handle))]
    async fn insert(&self, record: CredentialRecord) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        self.append(record).await
    }

    #[instrument(skip(self, record), fields(path = %self.path.display(), handle = %record.handle))]
    async fn insert_unique(&self, record: CredentialRecord) -> Result<bool, RepositoryError> {
        let _guard = self.write_lock.lock().await;

        if self.find_by_handle(&record.handle).await?.is_some() {
            return Ok(false);
        }
        self.append(record).await?;
        Ok(true)
    }
}

// =============================================================================
// In-memory registry
// =============================================================================

/// Registry held in memory for the life of the value.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    records: RwLock<Vec<CredentialRecord>>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records, kept in the given order.
    #[must_use]
    pub fn with_records(records: Vec<CredentialRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl CredentialRepository for MemoryRegistry {
    async fn list_all(&self) -> Result<Vec<CredentialRecord>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| &record.handle == handle)
            .cloned())
    }

    async fn insert(&self, record: CredentialRecord) -> Result<(), RepositoryError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn insert_unique(&self, record: CredentialRecord) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.handle == record.handle) {
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn record(business: &str, password: &str) -> CredentialRecord {
        CredentialRecord {
            owner_name: "Owner".to_string(),
            business_name: business.to_string(),
            handle: Handle::from_business_name(business),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = JsonFileRegistry::new(dir.path().join("registry.json"));
        assert!(registry.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_persists_array_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("registry.json");
        let registry = JsonFileRegistry::new(&path);

        registry.insert(record("Sharma Co", "pw1")).await.unwrap();
        registry.insert(record("Verma Traders", "pw2")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let array = raw.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["emailPrefix"], "sharmaco");
        assert_eq!(array[1]["emailPrefix"], "vermatraders");

        // A fresh handle on the same file sees the same data.
        let reopened = JsonFileRegistry::new(&path);
        let found = reopened
            .find_by_handle(&Handle::normalize_login("vermatraders"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password, "pw2");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, "{not json").unwrap();

        let registry = JsonFileRegistry::new(&path);
        let err = registry.list_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[tokio::test]
    async fn test_insert_unique_skips_taken_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let registry = JsonFileRegistry::new(&path);

        assert!(registry.insert_unique(record("Sharma Co", "pw1")).await.unwrap());
        assert!(!registry.insert_unique(record("sharma co", "pw2")).await.unwrap());

        let records = registry.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].password, "pw1");

        let memory = MemoryRegistry::new();
        assert!(memory.insert_unique(record("Verma Traders", "a")).await.unwrap());
        assert!(!memory.insert_unique(record("VermaTraders", "b")).await.unwrap());
        assert_eq!(memory.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_insert_unique_keeps_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let registry = JsonFileRegistry::new(dir.path().join("registry.json"));

        let (a, b, c) = tokio::join!(
            registry.insert_unique(record("Sharma Co", "pw1")),
            registry.insert_unique(record("sharma co", "pw2")),
            registry.insert_unique(record("SHARMA CO", "pw3")),
        );
        let inserted = [a.unwrap(), b.unwrap(), c.unwrap()];
        assert_eq!(inserted.iter().filter(|ok| **ok).count(), 1);
        assert_eq!(registry.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_handle_returns_first_inserted() {
        let registry = MemoryRegistry::with_records(vec![
            record("Sharma Co", "first"),
            record("Sharma Co", "second"),
        ]);

        let found = registry
            .find_by_handle(&Handle::from_business_name("Sharma Co"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password, "first");
    }
}
